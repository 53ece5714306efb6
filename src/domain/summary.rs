const SUMMARY_HEADER: &str = "Summary of the repository:\n";

/// Aggregated per-file summaries for one run.
#[derive(Debug, Clone)]
pub struct RepositorySummary(String);

impl RepositorySummary {
    pub fn new() -> Self {
        Self(SUMMARY_HEADER.to_string())
    }

    pub fn push_file(&mut self, path: &str, chunk_summaries: &[String]) {
        let combined = chunk_summaries.join(" ");
        self.0
            .push_str(&format!("\nFile: {path}\nSummary: {combined}\n\n"));
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `max_chars` characters, for log output.
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.0.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl Default for RepositorySummary {
    fn default() -> Self {
        Self::new()
    }
}
