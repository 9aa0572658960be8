//! Project source scanning
//!
//! The known class/trigger name set comes from the project's source tree:
//! `classes/*.cls` and `triggers/*.trigger` under the source directory.

use crate::result::{ReportError, ReportResult};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Kind of deployable unit found in the source tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Apex class (`classes/*.cls`)
    Class,
    /// Apex trigger (`triggers/*.trigger`)
    Trigger,
}

impl SourceKind {
    const fn folder(self) -> &'static str {
        match self {
            Self::Class => "classes",
            Self::Trigger => "triggers",
        }
    }

    const fn extension(self) -> &'static str {
        match self {
            Self::Class => "cls",
            Self::Trigger => "trigger",
        }
    }
}

/// Class and trigger names of a project
#[derive(Debug, Clone, Default)]
pub struct ProjectSources {
    src_dir: PathBuf,
    classes: BTreeSet<String>,
    triggers: BTreeSet<String>,
}

impl ProjectSources {
    /// Scan a project source directory
    ///
    /// Missing `classes` or `triggers` folders are treated as empty.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `src_dir` is not a directory
    pub fn scan(src_dir: impl Into<PathBuf>) -> ReportResult<Self> {
        let src_dir = src_dir.into();
        if !src_dir.is_dir() {
            return Err(ReportError::config(format!(
                "source directory {} does not exist",
                src_dir.display()
            )));
        }

        let classes = scan_kind(&src_dir, SourceKind::Class)?;
        let triggers = scan_kind(&src_dir, SourceKind::Trigger)?;
        info!(
            src = %src_dir.display(),
            classes = classes.len(),
            triggers = triggers.len(),
            "scanned project sources"
        );

        Ok(Self {
            src_dir,
            classes,
            triggers,
        })
    }

    /// Source directory that was scanned
    #[must_use]
    pub fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    /// Apex class names
    #[must_use]
    pub const fn classes(&self) -> &BTreeSet<String> {
        &self.classes
    }

    /// Apex trigger names
    #[must_use]
    pub const fn triggers(&self) -> &BTreeSet<String> {
        &self.triggers
    }

    /// All class and trigger names
    #[must_use]
    pub fn known_names(&self) -> BTreeSet<String> {
        self.classes.union(&self.triggers).cloned().collect()
    }
}

fn scan_kind(src_dir: &Path, kind: SourceKind) -> ReportResult<BTreeSet<String>> {
    let pattern = src_dir
        .join(kind.folder())
        .join(format!("*.{}", kind.extension()));
    let mut names = BTreeSet::new();

    for entry in glob::glob(&pattern.to_string_lossy())? {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            ReportError::file(path, e.into_error())
        })?;
        if !path.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            debug!(name = stem, ?kind, "found project source");
            names.insert(stem.to_string());
        }
    }

    Ok(names)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let classes = temp.path().join("classes");
        let triggers = temp.path().join("triggers");
        fs::create_dir_all(&classes).unwrap();
        fs::create_dir_all(&triggers).unwrap();
        fs::write(classes.join("Foo.cls"), "public class Foo {}").unwrap();
        fs::write(classes.join("Foo.cls-meta.xml"), "<ApexClass/>").unwrap();
        fs::write(classes.join("FooTest.cls"), "@isTest class FooTest {}").unwrap();
        fs::write(triggers.join("AccountTrigger.trigger"), "trigger AccountTrigger on Account (before insert) {}").unwrap();
        fs::write(triggers.join("README.md"), "notes").unwrap();
        temp
    }

    #[test]
    fn test_scan_classes_and_triggers() {
        let temp = project();
        let sources = ProjectSources::scan(temp.path()).unwrap();

        let classes: Vec<_> = sources.classes().iter().cloned().collect();
        assert_eq!(classes, vec!["Foo", "FooTest"]);
        assert!(sources.triggers().contains("AccountTrigger"));
        assert_eq!(sources.known_names().len(), 3);
        assert_eq!(sources.src_dir(), temp.path());
    }

    #[test]
    fn test_missing_subfolders_are_empty() {
        let temp = TempDir::new().unwrap();
        let sources = ProjectSources::scan(temp.path()).unwrap();
        assert!(sources.known_names().is_empty());
    }

    #[test]
    fn test_missing_src_dir_is_config_error() {
        let err = ProjectSources::scan("/nonexistent/src").unwrap_err();
        assert!(matches!(err, ReportError::Config { .. }));
    }
}
