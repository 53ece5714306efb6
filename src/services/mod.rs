pub mod language_model;
pub mod version_control;

#[cfg(test)]
pub mod fakes;

pub use language_model::{CompletionOptions, LanguageModelService};
pub use version_control::{CommitStatus, VersionControlService};
