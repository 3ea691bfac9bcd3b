//! Writing emitted bundles to their descriptor paths.
//!
//! All files of a build are written together: content goes to `<file>.tmp`
//! first, then each temp file is renamed over its target. Files that already
//! exist are moved aside to `<file>.bak` during the swap, so a failure at any
//! point restores the tree to what it was before the write started.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::builders::BuildResult;
use crate::{Error, Result};

/// Write every output of `result` (and its sourcemap, if any) under `root`.
///
/// Descriptor paths are relative to `root`. A path that resolves outside
/// `root` fails the whole write before anything touches the disk.
pub fn write_outputs(result: &BuildResult, root: impl AsRef<Path>) -> Result<()> {
    let root = absolute_root(root.as_ref())?;

    let mut operations: Vec<(PathBuf, &[u8])> = Vec::new();
    for output in &result.outputs {
        let file = output.descriptor.file.to_string_lossy();
        let target = validate_output_path(&root, &file)?;

        if let Some(map) = &output.sourcemap {
            operations.push((with_suffix(&target, ".map"), map.as_bytes()));
        }
        operations.push((target, output.code.as_bytes()));
    }

    write_files_atomic(&operations)?;

    for (path, content) in &operations {
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote output");
    }

    Ok(())
}

fn absolute_root(root: &Path) -> Result<PathBuf> {
    let cleaned = root.clean();
    if cleaned.is_absolute() {
        return Ok(cleaned);
    }

    let cwd = std::env::current_dir().map_err(|e| {
        Error::InvalidOutputPath(format!("Failed to get current directory: {}", e))
    })?;
    Ok(cwd.join(cleaned).clean())
}

/// Resolve `filename` against `root`, rejecting anything that escapes it.
pub(crate) fn validate_output_path(root: &Path, filename: &str) -> Result<PathBuf> {
    if filename.is_empty() {
        return Err(Error::InvalidOutputPath("Output path is empty".to_string()));
    }

    if filename.contains('\0') {
        return Err(Error::InvalidOutputPath(
            "Filename contains null byte".to_string(),
        ));
    }

    let full_path = root.join(Path::new(filename).clean()).clean();

    if full_path == root || !full_path.starts_with(root) {
        return Err(Error::InvalidOutputPath(format!(
            "Path '{}' escapes project root '{}' (resolved to '{}')",
            filename,
            root.display(),
            full_path.display()
        )));
    }

    Ok(full_path)
}

/// `index.js` + `.tmp` = `index.js.tmp`; unlike `with_extension`, siblings
/// such as `index.js` and `index.mjs` never collide.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

struct Staged {
    temp: PathBuf,
    target: PathBuf,
    backup: Option<PathBuf>,
    committed: bool,
}

fn write_files_atomic(operations: &[(PathBuf, &[u8])]) -> Result<()> {
    let mut staged: Vec<Staged> = Vec::with_capacity(operations.len());

    // Phase 1: temp files
    for (target, content) in operations {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                rollback(&staged);
                Error::WriteFailure(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp = with_suffix(target, ".tmp");
        fs::write(&temp, content).map_err(|e| {
            rollback(&staged);
            Error::WriteFailure(format!(
                "Failed to write temporary file '{}': {}",
                temp.display(),
                e
            ))
        })?;

        staged.push(Staged {
            temp,
            target: target.clone(),
            backup: None,
            committed: false,
        });
    }

    // Phase 2: swap into place
    for i in 0..staged.len() {
        if let Err(e) = commit(&mut staged[i]) {
            rollback(&staged);
            return Err(e);
        }
    }

    for entry in &staged {
        if let Some(backup) = &entry.backup {
            if let Err(e) = fs::remove_file(backup) {
                tracing::warn!(path = %backup.display(), error = %e, "failed to remove backup file");
            }
        }
    }

    Ok(())
}

fn commit(entry: &mut Staged) -> Result<()> {
    if entry.target.is_dir() {
        return Err(Error::WriteFailure(format!(
            "'{}' is a directory",
            entry.target.display()
        )));
    }

    if entry.target.exists() {
        let backup = with_suffix(&entry.target, ".bak");
        fs::rename(&entry.target, &backup).map_err(|e| {
            Error::WriteFailure(format!(
                "Failed to move existing '{}' aside: {}",
                entry.target.display(),
                e
            ))
        })?;
        entry.backup = Some(backup);
    }

    fs::rename(&entry.temp, &entry.target).map_err(|e| {
        Error::WriteFailure(format!(
            "Failed to rename '{}' to '{}': {}",
            entry.temp.display(),
            entry.target.display(),
            e
        ))
    })?;
    entry.committed = true;

    Ok(())
}

/// Best effort: undo committed renames, restore backups, drop temp files.
fn rollback(staged: &[Staged]) {
    for entry in staged.iter().rev() {
        if entry.committed {
            remove_quietly(&entry.target);
        }
        if let Some(backup) = &entry.backup {
            if let Err(e) = fs::rename(backup, &entry.target) {
                tracing::warn!(
                    path = %entry.target.display(),
                    error = %e,
                    "failed to restore previous file"
                );
            }
        }
        remove_quietly(&entry.temp);
    }
}

fn remove_quietly(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to clean up file");
        }
    }
}
