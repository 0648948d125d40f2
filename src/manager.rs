//! Shell-like operations (`ls`, `cp`, `mv`, `rm`, `rmdir`, `mkdir`, `touch`, `cd`, `pwd`)
//! against a single mutable current root.
//!
//! ### Tokens
//! Every operation receives a *token*: a caller-supplied path string. Tokens are resolved
//! against the current root by one rule (see [`FileSystemManager::resolve`]):
//! - `""` and `"*"` denote the root itself;
//! - `"~"` denotes the home directory;
//! - anything else loses its first character (the sentinel, conventionally `.`), the rest is
//!   joined onto the root and normalized. So `./docs/a.txt` means `<root>/docs/a.txt`.
//!
//! `cd` layers a small state machine on top of this rule, `mkdir` strips only a leading
//! `./`, and `mkdir`/`touch` reject tokens without any path structure.

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use log::{debug, warn};

use crate::core::{FsBackend, Result, utils};
use crate::vfs::HostFS;

/// Facade holding the current root and delegating to a [`FsBackend`].
///
/// ### Usage notes:
/// - The root is always an absolute path to a directory that existed when it was set,
///   with one exception: `cd("~")` commits the home directory without checking it.
/// - Not thread‑safe: mutate the root from one caller at a time.
/// - Failures are returned via `anyhow::Result`; `is_err()` is the uniform "operation failed".
///
/// ### Example:
/// ```
/// use shell_fs::{FileSystemManager, MapFS};
///
/// let mut fs = FileSystemManager::with_backend(MapFS::new(), "/").unwrap();
/// fs.mkdir("./docs/notes").unwrap();
/// fs.touch("./docs/notes/today.txt").unwrap();
/// fs.cd("./docs").unwrap();
///
/// assert_eq!(fs.pwd(), "/docs");
/// assert!(fs.file_exists("./notes/today.txt"));
/// ```
#[derive(Debug)]
pub struct FileSystemManager<B: FsBackend = HostFS> {
    backend: B,
    root: PathBuf,         // absolute normalized path
    home: Option<PathBuf>, // overrides the environment when set
}

/// What `cd` does with the path it computed.
enum CdTarget {
    /// Commit only if the path is an existing directory.
    Checked(PathBuf),
    /// Commit without looking at the filesystem.
    Unchecked(PathBuf),
}

impl FileSystemManager<HostFS> {
    /// Creates a manager over the host filesystem, rooted at the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("unable to read current directory")?;
        Self::with_backend(HostFS::new(), cwd)
    }
}

impl<B: FsBackend> FileSystemManager<B> {
    /// Creates a manager over `backend` rooted at `root`.
    /// * `root` must be absolute and an existing directory in `backend`.
    pub fn with_backend<P: AsRef<Path>>(backend: B, root: P) -> Result<Self> {
        let root = root.as_ref();
        if root.as_os_str().is_empty() {
            return Err(anyhow!("invalid root path: empty"));
        }
        if root.is_relative() {
            return Err(anyhow!("the root path must be absolute"));
        }
        let root = utils::normalize(root);
        if !backend.is_dir(&root) {
            return Err(anyhow!("{} is not a directory", root.display()));
        }
        Ok(Self {
            backend,
            root,
            home: None,
        })
    }

    /// Overrides the home directory used for `~`.
    /// By default it is read from `HOME` (or `USERPROFILE`) on each use.
    pub fn set_home<P: AsRef<Path>>(&mut self, home: P) {
        self.home = Some(home.as_ref().to_path_buf());
    }

    /// Returns the current root.
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Returns the home directory, or an error if none is configured.
    pub fn home(&self) -> Result<PathBuf> {
        self.home
            .clone()
            .or_else(utils::home_dir)
            .ok_or_else(|| anyhow!("could not determine home directory"))
    }

    /// Resolves `token` to a concrete path:
    /// - `""` or `"*"` → the root;
    /// - `"~"` → the home directory;
    /// - otherwise the first character is dropped and the rest is joined onto the root.
    ///
    /// Leading separators left after the sentinel are ignored, so absolute-looking tokens
    /// stay inside the root: `./a` and `/a` both resolve to `<root>/a`.
    pub fn resolve(&self, token: &str) -> Result<PathBuf> {
        match token {
            "" | "*" => Ok(self.root.clone()),
            "~" => self.home(),
            _ => Ok(self.join_root(utils::strip_sentinel(token))),
        }
    }

    fn join_root(&self, rest: &str) -> PathBuf {
        let rest = rest.trim_start_matches(std::path::is_separator);
        utils::normalize(self.root.join(rest))
    }

    /// Returns true if the path denoted by `token` exists (file or directory).
    /// An unresolvable token (unset home) counts as missing.
    pub fn file_exists(&self, token: &str) -> bool {
        match self.resolve(token) {
            Ok(path) => {
                let exists = self.backend.exists(&path);
                debug!("file_exists {} -> {}", path.display(), exists);
                exists
            }
            Err(e) => {
                warn!("file_exists {:?}: {}", token, e);
                false
            }
        }
    }

    /// Lists the directory denoted by `token`, flattening one level of subdirectories.
    ///
    /// Files are yielded as they are; each subdirectory is replaced by its direct children
    /// (which may themselves be directories, not expanded further). Order follows the
    /// backend's enumeration.
    ///
    /// # Returns
    /// * `Ok(vec![])` - if the target is not a directory (or does not exist).
    /// * `Err(anyhow::Error)` - if the home directory is unknown or enumeration fails.
    ///
    /// # Example:
    /// ```
    /// use shell_fs::{FileSystemManager, MapFS};
    ///
    /// let mut fs = FileSystemManager::with_backend(MapFS::new(), "/").unwrap();
    /// fs.mkdir("./src/bin").unwrap();
    /// fs.touch("./src/lib.rs").unwrap();
    /// fs.touch("./Cargo.toml").unwrap();
    ///
    /// let listed = fs.ls("*").unwrap();
    /// assert_eq!(listed.len(), 3);
    /// assert!(listed.contains(&"/src/bin".into()));
    /// assert!(!listed.contains(&"/src".into()));
    /// ```
    pub fn ls(&self, token: &str) -> Result<Vec<PathBuf>> {
        let target = self.resolve(token)?;
        debug!("ls {}", target.display());

        let mut listed = Vec::new();
        if !self.backend.is_dir(&target) {
            return Ok(listed);
        }
        for entry in self.backend.list_entries(&target)? {
            if self.backend.is_dir(&entry) {
                listed.extend(self.backend.list_entries(&entry)?);
            } else {
                listed.push(entry);
            }
        }
        Ok(listed)
    }

    /// Copies the file `src` to `dst`, creating the parent directories of `dst` if needed.
    pub fn cp(&mut self, src: &str, dst: &str) -> Result<()> {
        let (src, dst) = self.prepare_transfer(src, dst)?;
        debug!("cp {} -> {}", src.display(), dst.display());
        self.backend.copy(&src, &dst).inspect_err(|e| warn!("cp: {e:#}"))
    }

    /// Moves `src` to `dst`, creating the parent directories of `dst` if needed.
    pub fn mv(&mut self, src: &str, dst: &str) -> Result<()> {
        let (src, dst) = self.prepare_transfer(src, dst)?;
        debug!("mv {} -> {}", src.display(), dst.display());
        self.backend.rename(&src, &dst).inspect_err(|e| warn!("mv: {e:#}"))
    }

    /// Shared preconditions of `cp` and `mv`: `src` must exist and the parent of `dst`
    /// is created when missing.
    fn prepare_transfer(&mut self, src: &str, dst: &str) -> Result<(PathBuf, PathBuf)> {
        let src = self.resolve(src)?;
        let dst = self.resolve(dst)?;
        if !self.backend.exists(&src) {
            warn!("source does not exist: {}", src.display());
            return Err(anyhow!("{} does not exist", src.display()));
        }
        if let Some(parent) = dst.parent() {
            if !self.backend.exists(parent) {
                self.backend
                    .create_dirs(parent)
                    .inspect_err(|e| warn!("{e:#}"))?;
            }
        }
        Ok((src, dst))
    }

    /// Removes a single file. Directories are refused (see `rmdir()`).
    pub fn rm(&mut self, token: &str) -> Result<()> {
        let path = self.resolve(token)?;
        debug!("rm {}", path.display());
        if !self.backend.exists(&path) {
            return Err(anyhow!("{} does not exist", path.display()));
        }
        if self.backend.is_dir(&path) {
            return Err(anyhow!("{} is a directory", path.display()));
        }
        self.backend.remove(&path).inspect_err(|e| warn!("rm: {e:#}"))
    }

    /// Removes a directory and everything below it.
    pub fn rmdir(&mut self, token: &str) -> Result<()> {
        let path = self.resolve(token)?;
        debug!("rmdir {}", path.display());
        if !self.backend.exists(&path) {
            return Err(anyhow!("{} does not exist", path.display()));
        }
        if !self.backend.is_dir(&path) {
            return Err(anyhow!("{} is not a directory", path.display()));
        }
        self.backend
            .remove_all(&path)
            .inspect_err(|e| warn!("rmdir: {e:#}"))
    }

    /// Creates a directory and all its missing parents.
    ///
    /// Only a leading `./` is stripped (down to `/`); other tokens are joined onto the root
    /// as written, so `a/b` creates `<root>/a/b`.
    ///
    /// Returns an error if:
    /// - the token ends with a separator;
    /// - the token has no path structure at all (`mkdir("name")`);
    /// - the path already exists;
    /// - the backend fails to create a directory.
    pub fn mkdir(&mut self, token: &str) -> Result<()> {
        if utils::ends_with_separator(token) {
            return Err(anyhow!("invalid path: trailing separator in {:?}", token));
        }
        let name = if token.starts_with("./") {
            &token[1..]
        } else {
            token
        };
        if !utils::has_separator(name) {
            return Err(anyhow!("invalid path: {:?} has no path structure", token));
        }
        let path = self.anchor(self.join_root(name));
        debug!("mkdir {}", path.display());

        if self.backend.exists(&path) {
            return Err(anyhow!("path already exists: {}", path.display()));
        }
        self.backend
            .create_dirs(&path)
            .inspect_err(|e| warn!("mkdir: {e:#}"))
    }

    /// Creates an empty file. An existing file is left untouched (content and timestamps)
    /// and reported as an error.
    pub fn touch(&mut self, token: &str) -> Result<()> {
        let rest = utils::strip_sentinel(token);
        if !utils::has_separator(rest) {
            return Err(anyhow!("invalid path: {:?} has no path structure", token));
        }
        let path = self.anchor(self.join_root(rest));
        debug!("touch {}", path.display());

        if self.backend.exists(&path) {
            return Err(anyhow!("{} already exists", path.display()));
        }
        self.backend
            .create_empty_file(&path)
            .inspect_err(|e| warn!("touch: {e:#}"))
    }

    /// Places `path` under the root. Joining an absolute path onto the root leaves it
    /// unchanged, so this only affects relative paths.
    fn anchor(&self, path: PathBuf) -> PathBuf {
        self.root.join(path)
    }

    /// Returns the current root as a string.
    pub fn pwd(&self) -> String {
        self.root.to_string_lossy().into_owned()
    }

    /// Changes the current root.
    ///
    /// The token is matched in this order:
    /// 1. absolute (`/tmp`) → that path, if it is a directory;
    /// 2. `~` → the home directory, committed without checking it;
    /// 3. starts with `..` → the parent of the root (the rest of the token is ignored);
    ///    at the filesystem root, or when a relative home left no parent, the root stays
    ///    where it is;
    /// 4. `""`, `*` or starts with `.` → resolved by [`resolve`](Self::resolve), if it is a
    ///    directory;
    /// 5. anything else (`docs`) → joined onto the root as written, if it is a directory.
    ///
    /// On error the root is unchanged.
    pub fn cd(&mut self, token: &str) -> Result<()> {
        let target = match self.cd_target(token)? {
            CdTarget::Checked(path) => {
                if !self.backend.is_dir(&path) {
                    warn!("cd: not a directory: {}", path.display());
                    return Err(anyhow!("{} is not a directory", path.display()));
                }
                path
            }
            CdTarget::Unchecked(path) => {
                if !self.backend.is_dir(&path) {
                    warn!("cd: committing {} which is not a directory", path.display());
                }
                path
            }
        };
        debug!("cd {} -> {}", self.root.display(), target.display());
        self.root = target;
        Ok(())
    }

    fn cd_target(&self, token: &str) -> Result<CdTarget> {
        let target = if Path::new(token).is_absolute() {
            CdTarget::Checked(utils::normalize(token))
        } else if token == "~" {
            CdTarget::Unchecked(self.home()?)
        } else if token.starts_with("..") {
            let parent = self
                .root
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or(self.root.as_path());
            CdTarget::Unchecked(parent.to_path_buf())
        } else if token.is_empty() || token == "*" || token.starts_with('.') {
            CdTarget::Checked(self.resolve(token)?)
        } else {
            CdTarget::Checked(utils::normalize(self.root.join(token)))
        };
        Ok(target)
    }

    /// Joins `relative_path` onto `absolute_path`; see [`utils::combine_paths`].
    pub fn combine_paths<P: AsRef<Path>, Q: AsRef<Path>>(
        absolute_path: P,
        relative_path: Q,
    ) -> PathBuf {
        utils::combine_paths(absolute_path, relative_path)
    }
}
