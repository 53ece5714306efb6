/// One commit's worth of changed paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitBatch<'a> {
    pub part: usize,
    pub paths: &'a [String],
}

impl CommitBatch<'_> {
    pub fn message(&self, prefix: &str, base_message: &str) -> String {
        format!("{prefix} {base_message} (part {})", self.part)
    }
}

/// Splits `paths` into contiguous groups of `len / commits_count` paths (at
/// least one), numbered from 1. The final group holds any remainder.
pub fn plan_batches(paths: &[String], commits_count: usize) -> Vec<CommitBatch<'_>> {
    let commits_count = commits_count.max(1);
    let batch_size = (paths.len() / commits_count).max(1);

    paths
        .chunks(batch_size)
        .enumerate()
        .map(|(idx, chunk)| CommitBatch {
            part: idx + 1,
            paths: chunk,
        })
        .collect()
}
