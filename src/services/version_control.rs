use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::AppResult;

/// What a stage/commit/push round did with the working tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStatus {
    Pushed,
    /// The staged paths matched `HEAD`; no commit was created or pushed.
    NothingToCommit,
}

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Clones `remote_url` into the working tree, or pulls if it already exists.
    async fn clone_or_sync(&self, remote_url: &str) -> AppResult<PathBuf>;
    /// Relative, `/`-separated paths of every file in the working tree.
    async fn list_files(&self) -> AppResult<Vec<String>>;
    async fn stage_commit_push(&self, paths: &[String], message: &str)
    -> AppResult<CommitStatus>;
}
