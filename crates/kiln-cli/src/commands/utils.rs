//! Shared helpers for command implementations.

use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Resolve the project directory from `--cwd`, defaulting to the process cwd.
///
/// Relative paths are joined onto the process working directory. The result
/// must be an existing directory.
pub fn resolve_cwd(cwd: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir()?;

    let dir = match cwd {
        Some(path) => resolve_path(path, &current),
        None => current,
    };

    if !dir.is_dir() {
        return Err(CliError::DirectoryNotFound(dir));
    }

    Ok(dir)
}

/// Join `path` onto `base` unless it is already absolute.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
