//! This module provides the backend that operates directly on the host filesystem.
//!
//! `HostFS` is a thin layer over `std::fs`: it holds no state, tracks nothing and
//! never cleans up after itself. Paths are taken as they come; resolution against
//! a current root happens in the manager before a path reaches this backend.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};

use crate::core::{FsBackend, Result};

/// Backend mapping every primitive onto the real filesystem.
///
/// ### Usage notes:
/// - Symlinks are not resolved specially: `exists()` and `is_dir()` follow them as
///   `std::fs` does, `remove()` removes the link itself.
/// - `copy()` copies a single file; copying a directory is an error.
/// - `rename()` does not fall back to copy+delete across devices.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFS;

impl HostFS {
    pub fn new() -> Self {
        Self
    }
}

impl FsBackend for HostFS {
    fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        std::fs::exists(path).unwrap_or(false)
    }

    fn is_dir<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_dir()
    }

    fn list_entries<P: AsRef<Path>>(&self, path: P) -> Result<Vec<PathBuf>> {
        let path = path.as_ref();
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)
            .with_context(|| format!("unable to read directory {}", path.display()))?
        {
            entries.push(entry?.path());
        }
        Ok(entries)
    }

    fn create_dirs<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::create_dir_all(path)
            .with_context(|| format!("unable to create directory {}", path.display()))
    }

    fn copy<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, src: P, dst: Q) -> Result<()> {
        let (src, dst) = (src.as_ref(), dst.as_ref());
        if src.is_dir() {
            return Err(anyhow!("{} is a directory", src.display()));
        }
        std::fs::copy(src, dst).with_context(|| {
            format!("unable to copy {} to {}", src.display(), dst.display())
        })?;
        Ok(())
    }

    fn rename<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, src: P, dst: Q) -> Result<()> {
        let (src, dst) = (src.as_ref(), dst.as_ref());
        std::fs::rename(src, dst)
            .with_context(|| format!("unable to move {} to {}", src.display(), dst.display()))
    }

    fn remove<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::remove_file(path)
            .with_context(|| format!("unable to remove {}", path.display()))
    }

    fn remove_all<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::remove_dir_all(path)
            .with_context(|| format!("unable to remove directory {}", path.display()))
    }

    fn create_empty_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .with_context(|| format!("unable to create file {}", path.display()))?;
        Ok(())
    }
}
