use tracing::{error, info};

use crate::context::AppContext;
use crate::domain::batch::plan_batches;
use crate::error::{AppError, AppResult};
use crate::services::CommitStatus;

/// Commits and pushes `paths` as a series of numbered commits.
///
/// Stops at the first batch that fails. Batches pushed before the failure
/// stay pushed. A batch whose files match `HEAD` is skipped and not counted,
/// so the returned count is the number of commits that reached the remote.
pub async fn commit_in_batches(
    ctx: &AppContext,
    paths: &[String],
    base_message: &str,
    commits_count: usize,
) -> AppResult<usize> {
    let batches = plan_batches(paths, commits_count);
    let mut pushed = 0;

    for batch in &batches {
        let message = batch.message(&ctx.config.commit_prefix, base_message);
        match ctx
            .version_control
            .stage_commit_push(batch.paths, &message)
            .await
        {
            Ok(CommitStatus::Pushed) => {
                pushed += 1;
                info!(
                    part = batch.part,
                    of = batches.len(),
                    files = batch.paths.len(),
                    "committed and pushed batch"
                );
            }
            Ok(CommitStatus::NothingToCommit) => {
                info!(part = batch.part, of = batches.len(), "batch unchanged, skipped");
            }
            Err(err) => {
                error!(part = batch.part, pushed, error = %err, "commit batch failed");
                return Err(AppError::CommitBatch {
                    pushed,
                    message: err.to_string(),
                });
            }
        }
    }
    Ok(pushed)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::context::test_support::test_context;
    use crate::services::fakes::{FakeLanguageModel, FakeVersionControl};

    fn paths(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("f{i}.txt")).collect()
    }

    fn context_with(vcs: Arc<FakeVersionControl>) -> AppContext {
        let root = std::env::temp_dir();
        test_context(&root, vcs, Arc::new(FakeLanguageModel::replying("")))
    }

    #[tokio::test]
    async fn pushes_one_commit_per_batch_in_order() {
        let vcs = Arc::new(FakeVersionControl::new(std::env::temp_dir(), Vec::new()));
        let ctx = context_with(vcs.clone());

        assert_eq!(
            commit_in_batches(&ctx, &paths(10), "AI-driven code improvements", 3)
                .await
                .unwrap(),
            4
        );

        let commits = vcs.commits();
        assert_eq!(commits.len(), 4);
        assert_eq!(
            commits.iter().map(|c| c.paths.len()).collect::<Vec<_>>(),
            vec![3, 3, 3, 1]
        );
        assert_eq!(commits[0].paths, vec!["f1.txt", "f2.txt", "f3.txt"]);
        assert_eq!(commits[3].paths, vec!["f10.txt"]);
        assert_eq!(
            commits[0].message,
            "[Autonomous Agent] AI-driven code improvements (part 1)"
        );
        assert_eq!(
            commits[3].message,
            "[Autonomous Agent] AI-driven code improvements (part 4)"
        );
    }

    #[tokio::test]
    async fn no_paths_is_a_successful_no_op() {
        let vcs = Arc::new(FakeVersionControl::new(std::env::temp_dir(), Vec::new()));
        let ctx = context_with(vcs.clone());

        assert_eq!(commit_in_batches(&ctx, &[], "msg", 3).await.unwrap(), 0);
        assert!(vcs.commits().is_empty());
    }

    #[tokio::test]
    async fn failure_aborts_and_keeps_earlier_pushes() {
        let vcs = Arc::new(
            FakeVersionControl::new(std::env::temp_dir(), Vec::new()).failing_push(2),
        );
        let ctx = context_with(vcs.clone());

        assert!(commit_in_batches(&ctx, &paths(3), "msg", 3).await.is_err());

        let commits = vcs.commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].paths, vec!["f1.txt"]);
    }

    #[tokio::test]
    async fn reports_how_many_batches_were_pushed() {
        let vcs = Arc::new(
            FakeVersionControl::new(std::env::temp_dir(), Vec::new()).failing_push(3),
        );
        let ctx = context_with(vcs.clone());

        let err = commit_in_batches(&ctx, &paths(6), "msg", 3)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::CommitBatch { pushed: 2, .. }));
    }

    #[tokio::test]
    async fn unchanged_batch_is_skipped_and_later_batches_still_run() {
        let vcs = Arc::new(
            FakeVersionControl::new(std::env::temp_dir(), Vec::new()).unchanged_on(1),
        );
        let ctx = context_with(vcs.clone());

        assert_eq!(commit_in_batches(&ctx, &paths(3), "msg", 3).await.unwrap(), 2);

        let commits = vcs.commits();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].paths, vec!["f2.txt"]);
        assert_eq!(commits[1].message, "[Autonomous Agent] msg (part 3)");
    }

    #[tokio::test]
    async fn zero_commits_count_means_single_commit() {
        let vcs = Arc::new(FakeVersionControl::new(std::env::temp_dir(), Vec::new()));
        let ctx = context_with(vcs.clone());

        assert_eq!(commit_in_batches(&ctx, &paths(5), "msg", 0).await.unwrap(), 1);
        assert_eq!(vcs.commits()[0].paths.len(), 5);
    }
}
