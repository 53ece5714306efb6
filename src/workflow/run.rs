use tracing::{debug, info};

use crate::context::AppContext;
use crate::domain::change::ChangeMap;
use crate::domain::snapshot::RepositorySnapshot;
use crate::error::AppResult;
use crate::workflow::apply::write_changes;
use crate::workflow::commit::commit_in_batches;
use crate::workflow::propose::propose_changes;
use crate::workflow::summarize::summarize_repository;

pub const BASE_COMMIT_MESSAGE: &str = "AI-driven code improvements";
const SUMMARY_LOG_PREVIEW: usize = 500;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub files_scanned: usize,
    pub files_proposed: usize,
    pub files_written: usize,
    pub commits_pushed: usize,
}

/// One full pass: sync, summarize, propose, write, commit.
pub async fn run_once(ctx: &AppContext) -> AppResult<RunOutcome> {
    let root = ctx
        .version_control
        .clone_or_sync(&ctx.config.repo_url)
        .await?;

    let paths = ctx.version_control.list_files().await?;
    let snapshot = RepositorySnapshot::load(&root, &paths).await;
    info!(listed = paths.len(), readable = snapshot.len(), "captured repository snapshot");

    let mut outcome = RunOutcome {
        files_scanned: snapshot.len(),
        ..RunOutcome::default()
    };

    let summarized = summarize_repository(ctx, &snapshot).await?;
    info!(
        summary = %summarized.summary.preview(SUMMARY_LOG_PREVIEW),
        "repository summarized"
    );
    debug!(suggestions = %summarized.suggestions, "improvement suggestions");

    let proposal = propose_changes(ctx, &summarized.summary, &summarized.suggestions).await?;
    let changes = ChangeMap::parse(&proposal);
    outcome.files_proposed = changes.len();
    if changes.is_empty() {
        info!("model proposed no modifications");
        return Ok(outcome);
    }
    info!(files = changes.len(), "model proposed changes");

    let written = write_changes(&root, &changes).await;
    outcome.files_written = written.len();
    if written.is_empty() {
        info!("no proposed change could be written");
        return Ok(outcome);
    }

    outcome.commits_pushed = commit_in_batches(
        ctx,
        &written,
        BASE_COMMIT_MESSAGE,
        ctx.config.commits_count,
    )
    .await?;
    Ok(outcome)
}
