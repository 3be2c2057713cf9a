//! Filesystem port for reading the manifest and deleting assets.

use std::io;
use std::path::Path;

/// Provides the filesystem access a sweep needs.
///
/// Methods return [`io::Result`] so callers can tell `NotFound` apart from
/// `PermissionDenied` when a deletion fails.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Returns `true` if the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Deletes a single file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, `NotFound` included.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}
