use crate::context::AppContext;
use crate::domain::summary::RepositorySummary;
use crate::error::AppResult;

/// Asks the model for whole-file edits in the `FILENAME: <content>` / `---`
/// record format and returns its raw reply.
pub async fn propose_changes(
    ctx: &AppContext,
    summary: &RepositorySummary,
    suggestions: &str,
) -> AppResult<String> {
    ctx.ask(&proposal_prompt(summary, suggestions)).await
}

fn proposal_prompt(summary: &RepositorySummary, suggestions: &str) -> String {
    format!(
        "You are an advanced code refactoring AI. Based on:\n\
         Summary:\n{}\n\n\
         Suggestions:\n{suggestions}\n\n\
         Propose a series of code modifications that can be directly applied. \
         Format your response as a structured list of changes:\n\n\
         FILENAME: <new content>\n---\n\
         FILENAME: <new content>\n---\n\
         Only return the structured list. No extra commentary.",
        summary.as_str()
    )
}
