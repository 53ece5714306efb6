use clap::{Args, Subcommand};

use crate::config::AppConfig;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(),
    }
}

fn run_show() -> AppResult<()> {
    let cfg = AppConfig::load()?;
    for (label, value) in describe(&cfg) {
        println!("{label}: {value}");
    }
    Ok(())
}

fn describe(cfg: &AppConfig) -> Vec<(&'static str, String)> {
    vec![
        ("Repository URL", cfg.repo_url.clone()),
        ("Clone path", cfg.clone_path.display().to_string()),
        ("OpenAI API key", mask_secret(&cfg.openai_api_key)),
        ("OpenAI base URL", cfg.openai_base_url.clone()),
        ("Model", cfg.openai_model.clone()),
        ("Temperature", cfg.openai_temperature.to_string()),
        ("Max chunk size", cfg.max_chunk_size.to_string()),
        ("Max attempts", cfg.max_retries.to_string()),
        ("Commit prefix", cfg.commit_prefix.clone()),
        ("Commits per run", cfg.commits_count.to_string()),
        ("Run interval (s)", cfg.run_interval.as_secs().to_string()),
    ]
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
