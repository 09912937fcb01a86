//! `once`: a single refresh pass.

use anyhow::Result;

use crate::cli::output::{output, PassOutput};
use crate::cli::types::OnceArgs;
use crate::domain::models::Config;

use super::{apply_issue_override, build_pipeline};

pub async fn execute(args: OnceArgs, mut config: Config, json_mode: bool) -> Result<()> {
    apply_issue_override(&mut config, args.issues);

    let pipeline = build_pipeline(&config).await?;
    let report = pipeline.scheduler.run_pass(&pipeline.issues).await;

    output(&PassOutput { report }, json_mode);
    Ok(())
}
