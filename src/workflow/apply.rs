use std::path::{Component, Path, PathBuf};

use tracing::{error, info};

use crate::domain::change::ChangeMap;
use crate::error::{AppError, AppResult};

/// Writes every proposed file under `root` and returns the relative paths that
/// made it to disk, in proposal order. A file that cannot be written is logged
/// and left out.
pub async fn write_changes(root: &Path, changes: &ChangeMap) -> Vec<String> {
    let mut written = Vec::with_capacity(changes.len());
    for (filename, content) in changes.iter() {
        match write_one(root, filename, content).await {
            Ok(target) => {
                info!(path = %target.display(), bytes = content.len(), "wrote proposed change");
                written.push(filename.to_string());
            }
            Err(err) => error!(path = filename, error = %err, "writing proposed change failed"),
        }
    }
    written
}

async fn write_one(root: &Path, filename: &str, content: &str) -> AppResult<PathBuf> {
    let relative = checked_relative_path(filename)?;
    let target = root.join(relative);
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&target, content).await?;
    Ok(target)
}

/// Only plain relative paths that stay inside the working tree and outside
/// `.git` are accepted.
fn checked_relative_path(filename: &str) -> AppResult<&Path> {
    let path = Path::new(filename);
    let mut normal_parts = 0;
    for component in path.components() {
        match component {
            Component::Normal(part) if part == ".git" => {
                return Err(rejected(filename, "targets the .git directory"));
            }
            Component::Normal(_) => normal_parts += 1,
            Component::CurDir => {}
            Component::ParentDir => return Err(rejected(filename, "escapes the working tree")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(rejected(filename, "is absolute"));
            }
        }
    }
    if normal_parts == 0 {
        return Err(rejected(filename, "names no file"));
    }
    Ok(path)
}

fn rejected(filename: &str, reason: &str) -> AppError {
    AppError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("refusing to write '{filename}': path {reason}"),
    ))
}
