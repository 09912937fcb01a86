//! `run`: refresh test cases until stopped.

use anyhow::Result;

use crate::cli::output::{output, RunOutput};
use crate::cli::types::RunArgs;
use crate::domain::models::Config;

use super::{apply_issue_override, build_pipeline};

pub async fn execute(args: RunArgs, mut config: Config, json_mode: bool) -> Result<()> {
    apply_issue_override(&mut config, args.issues);
    if let Some(interval) = args.interval {
        config.scheduler.interval_secs = interval;
    }
    if let Some(passes) = args.passes {
        config.scheduler.max_passes = Some(passes);
    }

    let pipeline = build_pipeline(&config).await?;
    let handle = pipeline.scheduler.handle();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            handle.stop();
        }
    });

    let reason = pipeline.scheduler.run(&pipeline.issues).await;
    let status = pipeline.scheduler.status().await;

    output(&RunOutput { reason, status }, json_mode);
    Ok(())
}
