use tracing::{debug, info};

use crate::context::AppContext;
use crate::domain::chunk::chunk_text;
use crate::domain::snapshot::RepositorySnapshot;
use crate::domain::summary::RepositorySummary;
use crate::error::AppResult;

pub struct SummaryOutcome {
    pub summary: RepositorySummary,
    pub suggestions: String,
}

/// Summarizes each file chunk by chunk, then asks for improvements across
/// the whole repository. One model call per chunk plus one final call.
pub async fn summarize_repository(
    ctx: &AppContext,
    snapshot: &RepositorySnapshot,
) -> AppResult<SummaryOutcome> {
    let mut summary = RepositorySummary::new();

    for file in snapshot.files() {
        let chunks = chunk_text(&file.content, ctx.config.max_chunk_size);
        debug!(path = %file.path, chunks = chunks.len(), "summarizing file");

        let mut partials = Vec::with_capacity(chunks.len());
        for (idx, chunk) in chunks.iter().enumerate() {
            let prompt = chunk_prompt(&file.path, idx + 1, chunk);
            partials.push(ctx.ask(&prompt).await?);
        }
        summary.push_file(&file.path, &partials);
    }

    info!(files = snapshot.len(), "requesting improvement suggestions");
    let suggestions = ctx.ask(&suggestions_prompt(&summary)).await?;

    Ok(SummaryOutcome {
        summary,
        suggestions,
    })
}

fn chunk_prompt(path: &str, chunk_number: usize, chunk: &str) -> String {
    format!(
        "You are analyzing a repository file. Below is a chunk of file '{path}'.\n\
         Chunk {chunk_number}:\n{chunk}\n\n\
         Please provide a short summary of this chunk (no more than 50 words)."
    )
}

fn suggestions_prompt(summary: &RepositorySummary) -> String {
    format!(
        "Based on the code summaries:\n{}\n\n\
         Provide a list of potential improvements or new features (as bullet points).",
        summary.as_str()
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::context::test_support::test_context;
    use crate::error::AppError;
    use crate::services::fakes::{FakeLanguageModel, FakeVersionControl};

    fn context_with(model: Arc<FakeLanguageModel>) -> AppContext {
        let root = std::env::temp_dir();
        let vcs = Arc::new(FakeVersionControl::new(root.clone(), Vec::new()));
        test_context(&root, vcs, model)
    }

    #[tokio::test]
    async fn small_file_needs_two_calls() {
        let model = Arc::new(FakeLanguageModel::new(|idx, _| {
            Ok(if idx == 0 {
                "Prints the number one.".to_string()
            } else {
                "- Add tests".to_string()
            })
        }));
        let ctx = context_with(model.clone());
        let snapshot: RepositorySnapshot = [("a.py", "print(1)")].into_iter().collect();

        let outcome = summarize_repository(&ctx, &snapshot).await.unwrap();

        assert_eq!(model.calls(), 2);
        assert!(outcome.summary.as_str().contains("File: a.py"));
        assert!(outcome.summary.as_str().contains("Summary: Prints the number one."));
        assert_eq!(outcome.suggestions, "- Add tests");

        let prompts = model.prompts();
        assert!(prompts[0].contains("chunk of file 'a.py'"));
        assert!(prompts[0].contains("Chunk 1:\nprint(1)"));
        assert!(prompts[1].contains("File: a.py"));
    }

    #[tokio::test]
    async fn joins_chunk_summaries_with_spaces() {
        let model = Arc::new(FakeLanguageModel::new(|idx, _| Ok(format!("part{idx}"))));
        let mut ctx = context_with(model.clone());
        ctx.config.max_chunk_size = 4;
        let snapshot: RepositorySnapshot =
            [("long.txt", "abcdefghij"), ("empty.txt", "")].into_iter().collect();

        let outcome = summarize_repository(&ctx, &snapshot).await.unwrap();

        // 3 chunks for long.txt, none for empty.txt, 1 suggestions call
        assert_eq!(model.calls(), 4);
        assert!(
            outcome
                .summary
                .as_str()
                .contains("File: long.txt\nSummary: part0 part1 part2\n")
        );
        assert!(outcome.summary.as_str().contains("File: empty.txt\nSummary: \n"));
        let prompts = model.prompts();
        assert!(prompts[2].contains("Chunk 3:\nij"));
    }

    #[tokio::test]
    async fn fatal_model_error_aborts() {
        let model = Arc::new(FakeLanguageModel::new(|_, _| {
            Err(AppError::LanguageModel("invalid api key".to_string()))
        }));
        let ctx = context_with(model.clone());
        let snapshot: RepositorySnapshot =
            [("a.py", "print(1)"), ("b.py", "print(2)")].into_iter().collect();

        let result = summarize_repository(&ctx, &snapshot).await;

        assert!(matches!(result, Err(AppError::LanguageModel(_))));
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn rate_limits_are_retried_per_chunk() {
        let model = Arc::new(FakeLanguageModel::new(|idx, _| match idx {
            0 => Err(AppError::RateLimited("429".to_string())),
            _ => Ok("ok".to_string()),
        }));
        let ctx = context_with(model.clone());
        let snapshot: RepositorySnapshot = [("a.py", "print(1)")].into_iter().collect();

        let outcome = summarize_repository(&ctx, &snapshot).await.unwrap();

        assert_eq!(model.calls(), 3);
        assert!(outcome.summary.as_str().contains("Summary: ok"));
    }
}
