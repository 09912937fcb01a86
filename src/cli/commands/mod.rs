//! CLI command implementations.

pub mod config;
pub mod once;
pub mod run;

use anyhow::{bail, Context, Result};

use crate::domain::models::{Config, IssueKey};
use crate::services::{
    ContextAdapter, ContextAnalyzer, ContextScheduler, SchedulerConfig, TestCaseGenerator,
};

/// Fully wired refresh pipeline.
pub struct Pipeline {
    pub adapter: ContextAdapter,
    pub scheduler: ContextScheduler,
    pub issues: Vec<IssueKey>,
}

/// Replace the configured issue list when keys were given on the command line.
pub fn apply_issue_override(config: &mut Config, issues: Vec<String>) {
    if !issues.is_empty() {
        config.scheduler.issues = issues;
    }
}

/// Build the adapter, analyzer, generator and scheduler from configuration
/// and authenticate the backend.
///
/// Authentication failure is not fatal: the backend stays unauthenticated
/// and every issue fails until the process is restarted with working
/// credentials.
pub async fn build_pipeline(config: &Config) -> Result<Pipeline> {
    crate::infrastructure::config::ConfigLoader::validate(config)?;

    let issues = config.scheduler.issue_keys();
    if issues.is_empty() {
        bail!("No issues to track. Set scheduler.issues in the config or pass --issue KEY");
    }

    let adapter = ContextAdapter::from_config(&config.tracker)
        .context("Failed to create tracker backend")?;
    if !adapter.authenticate().await {
        tracing::warn!(
            backend = adapter.backend_name(),
            "Backend is not authenticated; issues will fail until credentials are fixed"
        );
    }

    let analyzer = ContextAnalyzer::new(adapter.clone());
    let generator = TestCaseGenerator::new(adapter.clone());
    let scheduler = ContextScheduler::new(
        analyzer,
        generator,
        SchedulerConfig::from(&config.scheduler),
    );

    Ok(Pipeline {
        adapter,
        scheduler,
        issues,
    })
}
