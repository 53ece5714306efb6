use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;
use walkdir::WalkDir;

use crate::error::{AppError, AppResult};
use crate::services::{CommitStatus, VersionControlService};

/// Drives the `git` binary, relying on the user's configured credentials.
pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    async fn git(&self, dir: &Path, args: &[&str]) -> AppResult<String> {
        let output = Command::new("git")
            .current_dir(dir)
            .args(args)
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to execute git: {err}")))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            let subcommand = args.first().copied().unwrap_or("git");
            Err(AppError::VersionControl(format!(
                "git {subcommand} failed: {}",
                failure_detail(&output.stderr, &output.stdout)
            )))
        }
    }

    /// Whether the index differs from `HEAD` after staging.
    async fn has_staged_changes(&self) -> AppResult<bool> {
        let output = Command::new("git")
            .current_dir(&self.workspace_root)
            .args(["diff", "--cached", "--quiet"])
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to execute git: {err}")))?;

        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(AppError::VersionControl(format!(
                "git diff failed: {}",
                failure_detail(&output.stderr, &output.stdout)
            ))),
        }
    }
}

/// Git reports some failures, such as "nothing to commit", on stdout only.
fn failure_detail(stderr: &[u8], stdout: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    if !stderr.trim().is_empty() {
        return stderr.trim().to_string();
    }
    String::from_utf8_lossy(stdout).trim().to_string()
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn clone_or_sync(&self, remote_url: &str) -> AppResult<PathBuf> {
        if self.workspace_root.exists() {
            info!(path = %self.workspace_root.display(), "pulling latest changes");
            self.git(&self.workspace_root, &["pull"]).await?;
        } else {
            info!(
                remote = remote_url,
                path = %self.workspace_root.display(),
                "cloning repository"
            );
            if let Some(parent) = self.workspace_root.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            let target = self.workspace_root.to_string_lossy().to_string();
            self.git(Path::new("."), &["clone", remote_url, &target])
                .await?;
        }
        Ok(self.workspace_root.clone())
    }

    async fn list_files(&self) -> AppResult<Vec<String>> {
        let root = self.workspace_root.clone();
        tokio::task::spawn_blocking(move || walk_files(&root))
            .await
            .map_err(|err| AppError::VersionControl(format!("file listing task failed: {err}")))?
    }

    async fn stage_commit_push(
        &self,
        paths: &[String],
        message: &str,
    ) -> AppResult<CommitStatus> {
        if paths.is_empty() {
            return Err(AppError::VersionControl(
                "nothing to stage for commit".to_string(),
            ));
        }
        let mut add_args = vec!["add", "--"];
        add_args.extend(paths.iter().map(String::as_str));
        self.git(&self.workspace_root, &add_args).await?;
        if !self.has_staged_changes().await? {
            info!(commit = message, files = paths.len(), "no staged changes, skipping commit");
            return Ok(CommitStatus::NothingToCommit);
        }
        self.git(&self.workspace_root, &["commit", "-m", message])
            .await?;
        self.git(&self.workspace_root, &["push"]).await?;
        info!(commit = message, files = paths.len(), "pushed commit");
        Ok(CommitStatus::Pushed)
    }
}

/// Every regular file under `root` except the `.git` directory, as sorted
/// `/`-separated relative paths.
fn walk_files(root: &Path) -> AppResult<Vec<String>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != ".git");

    for entry in walker {
        let entry = entry
            .map_err(|err| AppError::VersionControl(format!("failed to list files: {err}")))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            let parts: Vec<_> = relative
                .components()
                .map(|part| part.as_os_str().to_string_lossy())
                .collect();
            files.push(parts.join("/"));
        }
    }
    files.sort();
    Ok(files)
}
