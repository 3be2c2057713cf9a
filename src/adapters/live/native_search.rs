//! In-process search adapter that walks the tree with the `ignore` crate.
//!
//! Used where `ag` is not installed. Files ignored by `.gitignore` and hidden
//! files are skipped, matching what `ag` searches by default.

use std::path::Path;

use ignore::WalkBuilder;
use tracing::trace;

use crate::ports::search::SearchOracle;

/// Live search oracle that scans files without spawning a process.
pub struct NativeSearcher;

impl SearchOracle for NativeSearcher {
    fn name(&self) -> &str {
        "native"
    }

    fn probe(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }

    fn found(&self, needle: &str, root: &Path) -> bool {
        if !root.is_dir() {
            trace!(root = %root.display(), "search root is not a directory");
            return false;
        }
        WalkBuilder::new(root)
            .build()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .any(|entry| {
                // Binary and non-UTF-8 files cannot hold a resource reference.
                std::fs::read_to_string(entry.path()).is_ok_and(|text| text.contains(needle))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("ui");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(
            src.join("main-window.cpp"),
            "setWindowIcon(QIcon(\":/images/seafile.png\"));\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.h"), "// see logo-small.png for size\n").unwrap();
        dir
    }

    #[test]
    fn finds_literal_in_nested_file() {
        let tree = source_tree();
        assert!(NativeSearcher.found(":/images/seafile.png", tree.path()));
    }

    #[test]
    fn finds_basename_anywhere() {
        let tree = source_tree();
        assert!(NativeSearcher.found("logo-small.png", tree.path()));
    }

    #[test]
    fn reports_absent_needle() {
        let tree = source_tree();
        assert!(!NativeSearcher.found(":/images/unused.png", tree.path()));
    }

    #[test]
    fn missing_root_is_not_found() {
        let tree = source_tree();
        assert!(!NativeSearcher.found("seafile.png", &tree.path().join("nope")));
    }

    #[test]
    fn skips_hidden_files() {
        let tree = source_tree();
        std::fs::write(tree.path().join(".cache"), ":/images/hidden.png").unwrap();
        assert!(!NativeSearcher.found(":/images/hidden.png", tree.path()));
    }
}
