//! Shell-like file operations over a single mutable current root.
//!
//! ### Overview
//!
//! `shell-fs` exposes the familiar shell verbs (`ls`, `cp`, `mv`, `rm`, `rmdir`, `mkdir`,
//! `touch`, `cd`, `pwd`) as methods of [`FileSystemManager`]. The manager owns one piece of
//! state, the current root, and resolves every caller-supplied path token against it before
//! delegating to a backend.
//!
//! **Key ideas**:
//! - **One resolution rule**: `""`/`*` mean the root, `~` means home, anything else drops its
//!   leading sentinel (`./a` → `<root>/a`). See [`FileSystemManager::resolve`].
//! - **Pluggable backends**: the native primitives live behind the [`FsBackend`] trait.
//!   [`HostFS`] works on the real disk, [`MapFS`] keeps everything in memory.
//! - **Uniform failure**: every mutating operation returns `anyhow::Result<()>`.
//! - **Logging**: operations report through the `log` facade; install any logger to see them.

mod core;
mod manager;
mod vfs;

pub use crate::core::{FsBackend, Result, utils};
pub use manager::FileSystemManager;
pub use vfs::{Entry, EntryType, HostFS, MapFS};
