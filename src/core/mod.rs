pub mod utils;

use std::path::{Path, PathBuf};

/// Native filesystem primitives the manager delegates to.
///
/// Every path handed to a backend is already resolved: absolute and normalized.
/// Backends never interpret tokens, `~` or the current root.
pub trait FsBackend {
    /// Returns true if `path` exists (file or directory).
    fn exists<P: AsRef<Path>>(&self, path: P) -> bool;

    /// Returns true if `path` exists and is a directory.
    fn is_dir<P: AsRef<Path>>(&self, path: P) -> bool;

    /// Returns the direct children of the directory `path` as full paths,
    /// in the backend's enumeration order.
    fn list_entries<P: AsRef<Path>>(&self, path: P) -> Result<Vec<PathBuf>>;

    /// Creates `path` and all missing parents.
    fn create_dirs<P: AsRef<Path>>(&mut self, path: P) -> Result<()>;

    /// Copies a single file, replacing `dst` if it is an existing file.
    fn copy<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, src: P, dst: Q) -> Result<()>;

    /// Moves a file or a whole directory. The parent of `dst` must exist.
    fn rename<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, src: P, dst: Q) -> Result<()>;

    /// Removes a single entry. Fails on directories.
    fn remove<P: AsRef<Path>>(&mut self, path: P) -> Result<()>;

    /// Removes a directory and everything below it.
    fn remove_all<P: AsRef<Path>>(&mut self, path: P) -> Result<()>;

    /// Creates an empty file. Fails if `path` already exists.
    fn create_empty_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()>;
}

pub type Result<T> = std::result::Result<T, anyhow::Error>;
