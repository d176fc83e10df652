use crate::utils::error::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 取得 inventory / playbook 來源所在的目錄
///
/// - an existing directory is its own basedir
/// - an empty path or `.` means the current directory
/// - an existing file resolves to its parent directory
/// - anything else is taken as given
///
/// The result is absolute but symlinks are left alone, so a linked
/// inventory keeps its own `local_vars` next to it.
pub fn basedir(source: &Path) -> Result<PathBuf> {
    let dir = if source.as_os_str().is_empty() || source == Path::new(".") {
        std::env::current_dir()?
    } else if source.is_dir() {
        source.to_path_buf()
    } else if source.is_file() {
        match source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir()?,
        }
    } else {
        source.to_path_buf()
    };

    Ok(std::path::absolute(dir)?)
}

/// Absolute, symlink-free form of `path`.
///
/// A path that does not exist cannot be canonicalized; it is made absolute
/// instead so that discovery under it simply finds nothing.
pub fn normalize(path: &Path) -> Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(std::path::absolute(path)?),
        Err(e) => Err(e.into()),
    }
}
