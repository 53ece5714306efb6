use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("version control error: {0}")]
    VersionControl(String),
    #[error("language model rate limited: {0}")]
    RateLimited(String),
    #[error("language model error: {0}")]
    LanguageModel(String),
    #[error("language model still failing after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },
    #[error("commit batch failed after {pushed} pushed batch(es): {message}")]
    CommitBatch { pushed: usize, message: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// Whether repeating the same call after a delay may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::RateLimited(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rate_limits_are_retryable() {
        assert!(AppError::RateLimited("slow down".to_string()).is_retryable());
        assert!(!AppError::LanguageModel("bad request".to_string()).is_retryable());
        assert!(
            !AppError::RetriesExhausted {
                attempts: 5,
                message: "slow down".to_string(),
            }
            .is_retryable()
        );
        assert!(!AppError::VersionControl("push rejected".to_string()).is_retryable());
    }
}
