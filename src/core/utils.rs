use std::path::{Component, Path, PathBuf};

/// Lexically collapses `.` and `..` components and drops trailing separators.
/// `..` above the first component is discarded.
pub fn normalize<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(parent) = result.parent() {
                    result = parent.to_path_buf();
                }
            }
            _ => result.push(component),
        }
    }
    result
}

/// Drops the leading sentinel character of a token (`./a` becomes `/a`).
pub fn strip_sentinel(token: &str) -> &str {
    let mut chars = token.chars();
    chars.next();
    chars.as_str()
}

pub fn has_separator(s: &str) -> bool {
    s.chars().any(std::path::is_separator)
}

pub fn ends_with_separator(s: &str) -> bool {
    s.chars().last().is_some_and(std::path::is_separator)
}

/// Home directory from `HOME`, falling back to `USERPROFILE`.
/// The value is taken verbatim; `None` if neither is set or both are empty.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .or_else(|| std::env::var_os("USERPROFILE").filter(|home| !home.is_empty()))
        .map(PathBuf::from)
}

/// Joins `relative_path` onto `absolute_path` with the usual `Path::join`
/// rules: an absolute second argument replaces the first.
pub fn combine_paths<P: AsRef<Path>, Q: AsRef<Path>>(absolute_path: P, relative_path: Q) -> PathBuf {
    absolute_path.as_ref().join(relative_path)
}
