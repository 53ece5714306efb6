mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod retry;
mod scheduler;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::run::{self as run_cmd, RunCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::llm::OpenAiClient;

#[derive(Parser)]
#[command(
    name = "tender",
    author,
    version,
    about = "Summarizes a repository with a language model and pushes its proposed improvements"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agent now, then once per interval.
    Run(RunArgs),
    /// Inspect configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Override the remote repository URL.
    #[arg(short, long)]
    repo_url: Option<String>,
    /// Perform a single run and exit instead of scheduling.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        error!(error = %err, "tender exited with an error");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Run(args) => run_agent(args).await,
    }
}

async fn run_agent(args: RunArgs) -> AppResult<()> {
    let mut config = AppConfig::load()?;
    if let Some(repo_url) = args.repo_url {
        config.repo_url = repo_url;
    }

    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY not configured; model requests will fail");
    }

    let language_model = Arc::new(OpenAiClient::new(
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
    ));
    let git = Arc::new(GitCli::new(config.clone_path.clone()));
    let context = AppContext::new(config, git, language_model);

    run_cmd::run(context, RunCommandArgs { once: args.once }).await
}
