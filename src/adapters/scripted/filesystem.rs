//! Scripted adapter for the `FileSystem` port.

use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::filesystem::FileSystem;

/// In-memory filesystem.
///
/// Files are held in a map; removals mutate it and are logged. Paths marked
/// as protected fail deletion with `PermissionDenied`.
#[derive(Default)]
pub struct ScriptedFileSystem {
    files: Mutex<BTreeMap<PathBuf, String>>,
    protected: HashSet<PathBuf>,
    removed: Mutex<Vec<PathBuf>>,
}

impl ScriptedFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given contents.
    ///
    /// # Panics
    ///
    /// Panics if the file map lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.lock().expect("file map lock poisoned").insert(path.into(), contents.into());
        self
    }

    /// Makes deleting `path` fail with `PermissionDenied`.
    #[must_use]
    pub fn with_protected(mut self, path: impl Into<PathBuf>) -> Self {
        self.protected.insert(path.into());
        self
    }

    /// Returns the paths successfully removed so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the removal log lock is poisoned.
    #[must_use]
    pub fn removed(&self) -> Vec<PathBuf> {
        self.removed.lock().expect("removal log lock poisoned").clone()
    }
}

impl FileSystem for ScriptedFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .expect("file map lock poisoned")
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().expect("file map lock poisoned").contains_key(path)
    }

    // A directory exists here only while some file lives below it.
    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .lock()
            .expect("file map lock poisoned")
            .keys()
            .any(|file| file.as_path() != path && file.starts_with(path))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        if self.protected.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
        }
        let mut files = self.files.lock().expect("file map lock poisoned");
        if files.remove(path).is_none() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        }
        self.removed.lock().expect("removal log lock poisoned").push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_then_missing() {
        let fs = ScriptedFileSystem::new().with_file("/p/a.png", "");
        fs.remove_file(Path::new("/p/a.png")).unwrap();
        assert!(!fs.exists(Path::new("/p/a.png")));
        let err = fs.remove_file(Path::new("/p/a.png")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(fs.removed(), vec![PathBuf::from("/p/a.png")]);
    }

    #[test]
    fn directories_follow_their_files() {
        let fs = ScriptedFileSystem::new().with_file("/p/src/ui/main.cpp", "");
        assert!(fs.is_dir(Path::new("/p/src")));
        assert!(fs.is_dir(Path::new("/p/src/ui")));
        assert!(!fs.is_dir(Path::new("/p/src/ui/main.cpp")));
        assert!(!fs.is_dir(Path::new("/p/sr")));
    }

    #[test]
    fn protected_paths_are_denied() {
        let fs = ScriptedFileSystem::new().with_file("/p/a.png", "").with_protected("/p/a.png");
        let err = fs.remove_file(Path::new("/p/a.png")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(fs.exists(Path::new("/p/a.png")));
    }
}
