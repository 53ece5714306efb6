use async_trait::async_trait;

use crate::config::AppConfig;
use crate::error::AppResult;

/// Per-request knobs forwarded to the model provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f32,
    /// When false the provider is asked not to retain or reuse the result.
    pub store: bool,
}

impl CompletionOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model: config.openai_model.clone(),
            temperature: config.openai_temperature,
            store: false,
        }
    }
}

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    /// Fails with [`AppError::RateLimited`](crate::error::AppError::RateLimited)
    /// when the provider asks the caller to back off.
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> AppResult<String>;
}
