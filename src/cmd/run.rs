use tokio::sync::watch;
use tracing::{error, info};

use crate::context::AppContext;
use crate::error::AppResult;
use crate::scheduler::Scheduler;
use crate::workflow::run::{RunOutcome, run_once};

#[derive(Debug, Clone)]
pub struct RunCommandArgs {
    pub once: bool,
}

pub async fn run(ctx: AppContext, args: RunCommandArgs) -> AppResult<()> {
    if args.once {
        return run_and_report(&ctx).await.map(|_| ());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping scheduler");
        }
        let _ = shutdown_tx.send(true);
    });

    let interval = ctx.config.run_interval;
    Scheduler::new(interval)
        .run(
            move || {
                let ctx = ctx.clone();
                async move {
                    // Failures are logged; the next trigger still fires.
                    let _ = run_and_report(&ctx).await;
                }
            },
            shutdown_rx,
        )
        .await;
    Ok(())
}

async fn run_and_report(ctx: &AppContext) -> AppResult<RunOutcome> {
    info!(repo = %ctx.config.repo_url, "agent run started");
    match run_once(ctx).await {
        Ok(outcome) => {
            info!(
                scanned = outcome.files_scanned,
                proposed = outcome.files_proposed,
                written = outcome.files_written,
                commits = outcome.commits_pushed,
                "agent run complete"
            );
            Ok(outcome)
        }
        Err(err) => {
            error!(error = %err, "agent run failed");
            Err(err)
        }
    }
}
