//! Periodic context refresh loop.
//!
//! Runs analyzer → generator over an ordered issue list, one issue at a
//! time, then sleeps for a fixed interval and starts over:
//! - Failures (including panics) are isolated to the issue that caused them
//! - The sleep is interruptible through [`SchedulerHandle::stop`]
//! - An optional stop condition bounds the loop

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::Serialize;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::models::{IssueKey, SchedulerSettings};

use super::context_analyzer::ContextAnalyzer;
use super::test_case_generator::TestCaseGenerator;

/// Configuration for the context scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Sleep between the end of one pass and the start of the next.
    pub interval: Duration,
    /// Stop after this many passes; run indefinitely when `None`.
    pub max_passes: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600),
            max_passes: None,
        }
    }
}

impl SchedulerConfig {
    /// Create config with custom interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }

    /// Limit the number of passes.
    pub const fn max_passes(mut self, passes: u64) -> Self {
        self.max_passes = Some(passes);
        self
    }
}

impl From<&SchedulerSettings> for SchedulerConfig {
    fn from(settings: &SchedulerSettings) -> Self {
        Self {
            interval: settings.interval(),
            max_passes: settings.max_passes,
        }
    }
}

/// Where the scheduler currently is in its cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    /// Between passes.
    #[default]
    Idle,
    /// Iterating the issue set.
    Processing,
}

/// What happened to one issue during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IssueOutcome {
    /// Test case created or refreshed.
    Generated { remote_key: Option<String> },
    /// Backend had nothing for the issue.
    NoData,
    /// Context was analyzed but the test case was not stored.
    NotStored,
    /// Analysis failed or processing panicked.
    Failed { error: String },
}

impl IssueOutcome {
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::NotStored | Self::Failed { .. })
    }
}

/// Outcome of one issue within a pass report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueReport {
    pub issue_key: IssueKey,
    #[serde(flatten)]
    pub outcome: IssueOutcome,
}

/// Summary of a single pass over the issue set.
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    /// 1-based pass number within this scheduler's lifetime.
    pub pass: u64,
    /// Correlation id attached to the pass's log span.
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Per-issue outcomes in processing order.
    pub issues: Vec<IssueReport>,
    /// True when a stop request cut the pass short.
    pub interrupted: bool,
}

impl PassReport {
    pub fn generated(&self) -> usize {
        self.issues
            .iter()
            .filter(|r| matches!(r.outcome, IssueOutcome::Generated { .. }))
            .count()
    }

    pub fn failures(&self) -> usize {
        self.issues.iter().filter(|r| r.outcome.is_failure()).count()
    }
}

/// Reason the scheduler loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Requested through a handle.
    Requested,
    /// Configured pass limit reached.
    PassLimitReached,
    /// Stop condition hook returned true.
    ConditionMet,
}

/// Observable scheduler status.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SchedulerStatus {
    pub state: SchedulerState,
    /// Passes that visited every issue; an interrupted pass is not counted.
    pub passes_completed: u64,
    pub issues_processed: u64,
    pub generated: u64,
    pub failures: u64,
    pub last_pass_started: Option<DateTime<Utc>>,
    pub last_pass_finished: Option<DateTime<Utc>>,
}

/// Hook deciding, after each pass, whether the loop should end.
pub type StopCondition = Box<dyn Fn(&SchedulerStatus) -> bool + Send + Sync>;

/// Handle to control a running scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    cancel: CancellationToken,
    status: Arc<RwLock<SchedulerStatus>>,
}

impl SchedulerHandle {
    /// Request the scheduler to stop. Interrupts the inter-pass sleep.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Check if stop was requested.
    pub fn is_stop_requested(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Get current scheduler status.
    pub async fn status(&self) -> SchedulerStatus {
        self.status.read().await.clone()
    }
}

/// Drives the analyzer and generator over the tracked issues.
pub struct ContextScheduler {
    analyzer: ContextAnalyzer,
    generator: TestCaseGenerator,
    config: SchedulerConfig,
    status: Arc<RwLock<SchedulerStatus>>,
    cancel: CancellationToken,
    stop_condition: Option<StopCondition>,
}

impl ContextScheduler {
    pub fn new(analyzer: ContextAnalyzer, generator: TestCaseGenerator, config: SchedulerConfig) -> Self {
        Self {
            analyzer,
            generator,
            config,
            status: Arc::new(RwLock::new(SchedulerStatus::default())),
            cancel: CancellationToken::new(),
            stop_condition: None,
        }
    }

    /// Create with default configuration.
    pub fn with_defaults(analyzer: ContextAnalyzer, generator: TestCaseGenerator) -> Self {
        Self::new(analyzer, generator, SchedulerConfig::default())
    }

    /// End the loop after any pass for which `condition` returns true.
    pub fn with_stop_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&SchedulerStatus) -> bool + Send + Sync + 'static,
    {
        self.stop_condition = Some(Box::new(condition));
        self
    }

    /// Get a handle to control the scheduler.
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            cancel: self.cancel.clone(),
            status: self.status.clone(),
        }
    }

    /// Get current status.
    pub async fn status(&self) -> SchedulerStatus {
        self.status.read().await.clone()
    }

    /// Get configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Run passes until stopped.
    ///
    /// Without a pass limit or stop condition this only returns once a
    /// handle requests a stop.
    pub async fn run(&self, issues: &[IssueKey]) -> StopReason {
        tracing::info!(
            issues = issues.len(),
            interval_secs = self.config.interval.as_secs(),
            max_passes = ?self.config.max_passes,
            "Starting context scheduler"
        );

        let reason = loop {
            if self.cancel.is_cancelled() {
                break StopReason::Requested;
            }

            let report = self.run_pass(issues).await;
            if report.interrupted {
                break StopReason::Requested;
            }

            let status = self.status().await;
            if self
                .config
                .max_passes
                .is_some_and(|max| status.passes_completed >= max)
            {
                break StopReason::PassLimitReached;
            }
            if self.stop_condition.as_ref().is_some_and(|stop| stop(&status)) {
                break StopReason::ConditionMet;
            }

            tracing::info!(
                interval_secs = self.config.interval.as_secs(),
                "Sleeping until next pass"
            );
            tokio::select! {
                () = tokio::time::sleep(self.config.interval) => {}
                () = self.cancel.cancelled() => break StopReason::Requested,
            }
        };

        tracing::info!(reason = ?reason, "Context scheduler stopped");
        reason
    }

    /// Run one pass over `issues`, in order.
    pub async fn run_pass(&self, issues: &[IssueKey]) -> PassReport {
        let run_id = Uuid::new_v4();
        let pass = {
            let mut status = self.status.write().await;
            status.state = SchedulerState::Processing;
            status.last_pass_started = Some(Utc::now());
            status.passes_completed + 1
        };
        let span = tracing::info_span!("context_pass", pass = pass, run_id = %run_id);

        async move {
            let started_at = Utc::now();
            if issues.is_empty() {
                tracing::warn!("No issues configured for this pass");
            }

            let mut reports = Vec::with_capacity(issues.len());
            let mut interrupted = false;
            for issue_key in issues {
                if self.cancel.is_cancelled() {
                    tracing::info!(remaining = issues.len() - reports.len(), "Stop requested, ending pass early");
                    interrupted = true;
                    break;
                }
                let outcome = self.process_issue(issue_key).await;
                reports.push(IssueReport {
                    issue_key: issue_key.clone(),
                    outcome,
                });
            }

            let report = PassReport {
                pass,
                run_id,
                started_at,
                finished_at: Utc::now(),
                issues: reports,
                interrupted,
            };

            {
                let mut status = self.status.write().await;
                status.state = SchedulerState::Idle;
                if !report.interrupted {
                    status.passes_completed = pass;
                }
                status.issues_processed += report.issues.len() as u64;
                status.generated += report.generated() as u64;
                status.failures += report.failures() as u64;
                status.last_pass_finished = Some(report.finished_at);
            }

            tracing::info!(
                processed = report.issues.len(),
                generated = report.generated(),
                failures = report.failures(),
                "Pass completed"
            );
            report
        }
        .instrument(span)
        .await
    }

    /// Analyze and generate for one issue, containing any failure.
    async fn process_issue(&self, issue_key: &IssueKey) -> IssueOutcome {
        tracing::info!(issue_key = %issue_key, "Reanalyzing issue");

        let attempt = AssertUnwindSafe(async {
            let context = self.analyzer.extract_context(issue_key).await?;
            let result = self.generator.generate_test_case(&context).await;
            Ok::<_, DomainError>((context.is_empty(), result))
        })
        .catch_unwind()
        .await;

        match attempt {
            Ok(Ok((true, _))) => IssueOutcome::NoData,
            Ok(Ok((false, Some(result)))) => IssueOutcome::Generated {
                remote_key: result.remote_key().map(str::to_string),
            },
            Ok(Ok((false, None))) => IssueOutcome::NotStored,
            Ok(Err(e)) => {
                tracing::error!(issue_key = %issue_key, error = %e, "Error processing issue");
                IssueOutcome::Failed {
                    error: e.to_string(),
                }
            }
            Err(panic) => {
                let error = panic_message(panic.as_ref());
                tracing::error!(issue_key = %issue_key, error = %error, "Issue processing panicked");
                IssueOutcome::Failed { error }
            }
        }
    }
}

impl std::fmt::Debug for ContextScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextScheduler")
            .field("config", &self.config)
            .field("has_stop_condition", &self.stop_condition.is_some())
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic with non-string payload".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SchedulerConfig::default();
        assert_eq!(config.interval, Duration::from_secs(3600));
        assert!(config.max_passes.is_none());
    }

    #[test]
    fn test_config_with_interval_and_limit() {
        let config = SchedulerConfig::with_interval(Duration::from_secs(60)).max_passes(2);
        assert_eq!(config.interval, Duration::from_secs(60));
        assert_eq!(config.max_passes, Some(2));
    }

    #[test]
    fn test_config_from_settings() {
        let settings = SchedulerSettings {
            interval_secs: 90,
            issues: vec![],
            max_passes: Some(4),
        };
        let config = SchedulerConfig::from(&settings);
        assert_eq!(config.interval, Duration::from_secs(90));
        assert_eq!(config.max_passes, Some(4));
    }

    #[test]
    fn test_status_default_is_idle() {
        let status = SchedulerStatus::default();
        assert_eq!(status.state, SchedulerState::Idle);
        assert_eq!(status.passes_completed, 0);
        assert!(status.last_pass_started.is_none());
    }

    #[test]
    fn test_outcome_failure_classification() {
        assert!(!IssueOutcome::NoData.is_failure());
        assert!(!IssueOutcome::Generated { remote_key: None }.is_failure());
        assert!(IssueOutcome::NotStored.is_failure());
        assert!(IssueOutcome::Failed {
            error: "x".to_string()
        }
        .is_failure());
    }

    #[test]
    fn test_panic_message_extraction() {
        let static_payload: Box<dyn Any + Send> = Box::new("static boom");
        assert_eq!(panic_message(static_payload.as_ref()), "static boom");
        let owned_payload: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(owned_payload.as_ref()), "owned boom");
        let other_payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other_payload.as_ref()), "panic with non-string payload");
    }

    #[test]
    fn test_issue_report_serialization() {
        let report = IssueReport {
            issue_key: IssueKey::new("A-1"),
            outcome: IssueOutcome::Generated {
                remote_key: Some("QA-7".to_string()),
            },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["issue_key"], "A-1");
        assert_eq!(json["outcome"], "generated");
        assert_eq!(json["remote_key"], "QA-7");
    }
}
