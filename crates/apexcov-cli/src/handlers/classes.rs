//! Classes command handler

use crate::commands::ClassesArgs;
use crate::config::ProjectConfig;
use crate::error::CliResult;
use apexcov::ProjectSources;
use std::fmt::Write;

/// Execute the classes command, printing one name per line
pub fn execute_classes(project: &ProjectConfig, args: &ClassesArgs) -> CliResult<()> {
    let src_dir = args.src.as_ref().unwrap_or(&project.src_dir);
    let sources = ProjectSources::scan(src_dir)?;
    print!("{}", format_listing(&sources));
    Ok(())
}

/// Listing of classes then triggers
#[must_use]
pub fn format_listing(sources: &ProjectSources) -> String {
    let mut out = String::new();
    for name in sources.classes() {
        let _ = writeln!(out, "class   {name}");
    }
    for name in sources.triggers() {
        let _ = writeln!(out, "trigger {name}");
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_listing() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("classes")).unwrap();
        std::fs::create_dir_all(temp.path().join("triggers")).unwrap();
        std::fs::write(temp.path().join("classes/Foo.cls"), "").unwrap();
        std::fs::write(temp.path().join("triggers/OnInsert.trigger"), "").unwrap();

        let sources = ProjectSources::scan(temp.path()).unwrap();
        assert_eq!(format_listing(&sources), "class   Foo\ntrigger OnInsert\n");
    }

    #[test]
    fn test_missing_src_dir() {
        let args = ClassesArgs {
            src: Some("/nonexistent/src".into()),
        };
        assert!(execute_classes(&ProjectConfig::default(), &args).is_err());
    }
}
