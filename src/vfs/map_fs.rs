//! This module provides a backend that keeps the whole filesystem in memory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::anyhow;

use crate::core::{FsBackend, Result, utils};
use crate::{Entry, EntryType};

/// An in-memory backend storing file and directory entries in an ordered map.
///
/// `MapFS` gives the manager a host-free filesystem: nothing touches the disk, so
/// path resolution and the shell-like operations can be exercised deterministically.
///
/// ### Internal state
///
/// * `entries` — Key: **absolute normalized path**. Value: `Entry` holding the type and,
///   for files, the content. A `BTreeMap` keeps traversal ordered, so `list_entries()`
///   yields children sorted by path.
///
/// ### Invariants
///
/// 1. **Root existence**: `/` is always present and is a `Directory`; it cannot be removed.
/// 2. **Path normalization**: all keys are absolute and normalized.
/// 3. **Parent consistency**: for any entry at `/a/b/c` there is a `Directory` entry at `/a/b`.
///
/// ### Example
///
/// ```
/// use shell_fs::{FsBackend, MapFS};
///
/// let mut fs = MapFS::new();
/// fs.create_dirs("/docs").unwrap();
/// fs.write_file("/docs/note.txt", b"Hello").unwrap();
///
/// assert!(fs.exists("/docs/note.txt"));
/// assert_eq!(fs.read("/docs/note.txt").unwrap(), b"Hello");
/// ```
#[derive(Debug, Clone)]
pub struct MapFS {
    entries: BTreeMap<PathBuf, Entry>,
}

impl MapFS {
    /// Creates an empty filesystem holding only the root directory `/`.
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(PathBuf::from("/"), Entry::new(EntryType::Directory));
        Self { entries }
    }

    /// Creates or replaces a file with `content`. The parent directory must exist.
    pub fn write_file<P: AsRef<Path>>(&mut self, path: P, content: &[u8]) -> Result<()> {
        let key = Self::key(path)?;
        if self.is_dir(&key) {
            return Err(anyhow!("{} is a directory", key.display()));
        }
        self.check_parent(&key)?;
        self.entries.insert(key, Entry::with_content(content));
        Ok(())
    }

    /// Returns the content of a file.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<Vec<u8>> {
        let key = Self::key(path)?;
        let entry = self
            .entries
            .get(&key)
            .ok_or_else(|| anyhow!("{} does not exist", key.display()))?;
        match entry.entry_type() {
            EntryType::Directory => Err(anyhow!("{} is a directory", key.display())),
            EntryType::File => Ok(entry.content().to_vec()),
        }
    }

    fn key<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
        let key = utils::normalize(path);
        if !key.is_absolute() {
            return Err(anyhow!("path must be absolute: {}", key.display()));
        }
        Ok(key)
    }

    fn check_parent(&self, key: &Path) -> Result<()> {
        let parent = key
            .parent()
            .ok_or_else(|| anyhow!("{} has no parent", key.display()))?;
        if !self.is_dir(parent) {
            return Err(anyhow!("{} is not a directory", parent.display()));
        }
        Ok(())
    }

    /// Returns `key` itself and all its descendants.
    fn subtree(&self, key: &Path) -> Vec<PathBuf> {
        self.entries
            .keys()
            .filter(|&path| path.starts_with(key))
            .cloned()
            .collect()
    }
}

impl Default for MapFS {
    fn default() -> Self {
        Self::new()
    }
}

impl FsBackend for MapFS {
    fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        Self::key(path).is_ok_and(|key| self.entries.contains_key(&key))
    }

    fn is_dir<P: AsRef<Path>>(&self, path: P) -> bool {
        Self::key(path).is_ok_and(|key| self.entries.get(&key).is_some_and(Entry::is_dir))
    }

    fn list_entries<P: AsRef<Path>>(&self, path: P) -> Result<Vec<PathBuf>> {
        let key = Self::key(path)?;
        match self.entries.get(&key) {
            None => Err(anyhow!("{} does not exist", key.display())),
            Some(entry) if entry.is_file() => {
                Err(anyhow!("{} is not a directory", key.display()))
            }
            Some(_) => Ok(self
                .entries
                .keys()
                .filter(|&path| path.parent() == Some(key.as_path()))
                .cloned()
                .collect()),
        }
    }

    fn create_dirs<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let key = Self::key(path)?;
        let mut built = PathBuf::new();
        for component in key.components() {
            built.push(component);
            match self.entries.get(&built) {
                Some(entry) if entry.is_dir() => continue,
                Some(_) => {
                    return Err(anyhow!(
                        "path '{}' exists but is not a directory",
                        built.display()
                    ));
                }
                None => {
                    self.entries
                        .insert(built.clone(), Entry::new(EntryType::Directory));
                }
            }
        }
        Ok(())
    }

    fn copy<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, src: P, dst: Q) -> Result<()> {
        let src = Self::key(src)?;
        let dst = Self::key(dst)?;
        let entry = match self.entries.get(&src) {
            None => return Err(anyhow!("{} does not exist", src.display())),
            Some(entry) if entry.is_dir() => {
                return Err(anyhow!("{} is a directory", src.display()));
            }
            Some(entry) => entry.clone(),
        };
        if self.is_dir(&dst) {
            return Err(anyhow!("{} is a directory", dst.display()));
        }
        self.check_parent(&dst)?;
        self.entries.insert(dst, entry);
        Ok(())
    }

    fn rename<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, src: P, dst: Q) -> Result<()> {
        let src = Self::key(src)?;
        let dst = Self::key(dst)?;
        let src_is_dir = match self.entries.get(&src) {
            None => return Err(anyhow!("{} does not exist", src.display())),
            Some(entry) => entry.is_dir(),
        };
        if src == dst {
            return Ok(());
        }
        if src_is_dir && dst.starts_with(&src) {
            return Err(anyhow!(
                "cannot move {} into itself ({})",
                src.display(),
                dst.display()
            ));
        }
        if let Some(existing) = self.entries.get(&dst) {
            if src_is_dir || existing.is_dir() {
                return Err(anyhow!("{} already exists", dst.display()));
            }
        }
        self.check_parent(&dst)?;

        for old in self.subtree(&src) {
            if let Some(entry) = self.entries.remove(&old) {
                let relative = old.strip_prefix(&src)?;
                let new = if relative.as_os_str().is_empty() {
                    dst.clone()
                } else {
                    dst.join(relative)
                };
                self.entries.insert(new, entry);
            }
        }
        Ok(())
    }

    fn remove<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let key = Self::key(path)?;
        match self.entries.get(&key) {
            None => Err(anyhow!("{} does not exist", key.display())),
            Some(entry) if entry.is_dir() => Err(anyhow!("{} is a directory", key.display())),
            Some(_) => {
                self.entries.remove(&key);
                Ok(())
            }
        }
    }

    fn remove_all<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let key = Self::key(path)?;
        match self.entries.get(&key) {
            None => return Err(anyhow!("{} does not exist", key.display())),
            Some(entry) if entry.is_file() => {
                return Err(anyhow!("{} is not a directory", key.display()));
            }
            Some(_) => {}
        }
        if key.parent().is_none() {
            return Err(anyhow!("invalid path: the root cannot be removed"));
        }
        for path in self.subtree(&key) {
            self.entries.remove(&path);
        }
        Ok(())
    }

    fn create_empty_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let key = Self::key(path)?;
        if self.entries.contains_key(&key) {
            return Err(anyhow!("{} already exists", key.display()));
        }
        self.check_parent(&key)?;
        self.entries.insert(key, Entry::new(EntryType::File));
        Ok(())
    }
}
