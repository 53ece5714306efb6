use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHUNK_SIZE: usize = 12_000;
pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_CLONE_PATH: &str = "../cloned_repo_agent";
pub const DEFAULT_COMMIT_PREFIX: &str = "[Autonomous Agent]";
pub const DEFAULT_COMMITS_COUNT: usize = 3;
pub const DEFAULT_REPO_URL: &str = "https://github.com/derekdeming/graphs.git";
pub const DEFAULT_INTERVAL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_temperature: f32,
    pub openai_base_url: String,
    pub max_chunk_size: usize,
    pub max_retries: u32,
    pub clone_path: PathBuf,
    pub commit_prefix: String,
    pub commits_count: usize,
    pub repo_url: String,
    pub run_interval: Duration,
}

impl AppConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn load() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let max_chunk_size = parse_var(&lookup, "MAX_FILE_CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?;
        if max_chunk_size == 0 {
            return Err(AppError::Configuration(
                "MAX_FILE_CHUNK_SIZE must be greater than zero".to_string(),
            ));
        }
        let max_retries = parse_var(&lookup, "MAX_RETRIES", DEFAULT_MAX_RETRIES)?;
        if max_retries == 0 {
            return Err(AppError::Configuration(
                "MAX_RETRIES must be greater than zero".to_string(),
            ));
        }
        let interval_secs = parse_var(&lookup, "RUN_INTERVAL_SECS", DEFAULT_INTERVAL_SECS)?;
        if interval_secs == 0 {
            return Err(AppError::Configuration(
                "RUN_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            openai_api_key: lookup("OPENAI_API_KEY")
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            openai_model: text("OPENAI_MODEL", DEFAULT_MODEL),
            openai_temperature: parse_var(&lookup, "OPENAI_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            openai_base_url: text("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            max_chunk_size,
            max_retries,
            clone_path: PathBuf::from(text("LOCAL_CLONE_PATH", DEFAULT_CLONE_PATH)),
            commit_prefix: text("COMMIT_PREFIX", DEFAULT_COMMIT_PREFIX),
            commits_count: parse_var(&lookup, "COMMITS_COUNT", DEFAULT_COMMITS_COUNT)?.max(1),
            repo_url: text("TENDER_REPO_URL", DEFAULT_REPO_URL),
            run_interval: Duration::from_secs(interval_secs),
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key).map(|value| value.trim().to_string()) {
        Some(value) if !value.is_empty() => value
            .parse::<T>()
            .map_err(|err| AppError::Configuration(format!("invalid {key} '{value}': {err}"))),
        _ => Ok(default),
    }
}
