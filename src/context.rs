use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::retry::RetryPolicy;
use crate::services::{CompletionOptions, LanguageModelService, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
    pub language_model: Arc<dyn LanguageModelService>,
    pub retry: RetryPolicy,
    pub completion: CompletionOptions,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        version_control: Arc<dyn VersionControlService>,
        language_model: Arc<dyn LanguageModelService>,
    ) -> Self {
        let retry = RetryPolicy::new(config.max_retries);
        let completion = CompletionOptions::from_config(&config);
        Self {
            config,
            version_control,
            language_model,
            retry,
            completion,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sends one prompt to the model under the retry policy.
    pub async fn ask(&self, prompt: &str) -> AppResult<String> {
        self.retry
            .call(|| self.language_model.complete(prompt, &self.completion))
            .await
    }
}
