//! In-memory stand-ins for the service traits.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::services::{
    CommitStatus, CompletionOptions, LanguageModelService, VersionControlService,
};

type Responder = Box<dyn Fn(usize, &str) -> AppResult<String> + Send + Sync>;

pub struct FakeLanguageModel {
    responder: Responder,
    prompts: Mutex<Vec<String>>,
}

impl FakeLanguageModel {
    /// `responder` gets the zero-based call index and the prompt.
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(usize, &str) -> AppResult<String> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_, _| Ok(text.clone()))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModelService for FakeLanguageModel {
    async fn complete(&self, prompt: &str, _options: &CompletionOptions) -> AppResult<String> {
        let index = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len() - 1
        };
        (self.responder)(index, prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommit {
    pub paths: Vec<String>,
    pub message: String,
}

pub struct FakeVersionControl {
    root: PathBuf,
    files: Vec<String>,
    fail_sync: bool,
    fail_on_push: Option<usize>,
    unchanged_on: Option<usize>,
    attempts: Mutex<usize>,
    commits: Mutex<Vec<RecordedCommit>>,
}

impl FakeVersionControl {
    pub fn new(root: PathBuf, files: Vec<String>) -> Self {
        Self {
            root,
            files,
            fail_sync: false,
            fail_on_push: None,
            unchanged_on: None,
            attempts: Mutex::new(0),
            commits: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_sync(mut self) -> Self {
        self.fail_sync = true;
        self
    }

    /// Makes the `n`th (1-based) `stage_commit_push` call fail.
    pub fn failing_push(mut self, n: usize) -> Self {
        self.fail_on_push = Some(n);
        self
    }

    /// Makes the `n`th (1-based) `stage_commit_push` call find nothing staged.
    pub fn unchanged_on(mut self, n: usize) -> Self {
        self.unchanged_on = Some(n);
        self
    }

    pub fn commits(&self) -> Vec<RecordedCommit> {
        self.commits.lock().unwrap().clone()
    }
}

#[async_trait]
impl VersionControlService for FakeVersionControl {
    async fn clone_or_sync(&self, remote_url: &str) -> AppResult<PathBuf> {
        if self.fail_sync {
            return Err(AppError::VersionControl(format!(
                "could not reach {remote_url}"
            )));
        }
        Ok(self.root.clone())
    }

    async fn list_files(&self) -> AppResult<Vec<String>> {
        Ok(self.files.clone())
    }

    async fn stage_commit_push(
        &self,
        paths: &[String],
        message: &str,
    ) -> AppResult<CommitStatus> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };
        if self.fail_on_push == Some(attempt) {
            return Err(AppError::VersionControl("push rejected".to_string()));
        }
        if self.unchanged_on == Some(attempt) {
            return Ok(CommitStatus::NothingToCommit);
        }
        self.commits.lock().unwrap().push(RecordedCommit {
            paths: paths.to_vec(),
            message: message.to_string(),
        });
        Ok(CommitStatus::Pushed)
    }
}
