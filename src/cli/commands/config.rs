//! `config`: show the effective configuration.

use anyhow::Result;

use crate::cli::output::{output, ConfigOutput};
use crate::domain::models::Config;

#[allow(clippy::unused_async)]
pub async fn execute(config: Config, json_mode: bool) -> Result<()> {
    output(
        &ConfigOutput {
            config: config.redacted(),
        },
        json_mode,
    );
    Ok(())
}
