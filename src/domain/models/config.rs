use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::issue::IssueKey;

/// Placeholder shown instead of secret values.
pub const REDACTED: &str = "[REDACTED]";

/// Main configuration structure for the context engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Issue tracker / test management backend
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Refresh loop settings
    #[serde(default)]
    pub scheduler: SchedulerSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Copy of this configuration with every credential replaced.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        let tracker = &mut copy.tracker;
        for secret in [
            &mut tracker.jira_api_token,
            &mut tracker.client_id,
            &mut tracker.client_secret,
        ] {
            if !secret.is_empty() {
                *secret = REDACTED.to_string();
            }
        }
        if tracker.oauth_token.is_some() {
            tracker.oauth_token = Some(REDACTED.to_string());
        }
        copy
    }
}

/// Which backend transport serves the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Jira REST + Xray Cloud REST
    #[default]
    Rest,
    /// Protocol-based transport, not available yet
    Mcp,
}

impl BackendKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Mcp => "mcp",
        }
    }
}

/// Tracker connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrackerConfig {
    /// Backend variant
    #[serde(default)]
    pub backend: BackendKind,

    /// Jira site, e.g. `https://example.atlassian.net`
    #[serde(default)]
    pub jira_base_url: String,

    /// Jira account email for basic auth
    #[serde(default)]
    pub jira_email: String,

    /// Jira API token for basic auth
    #[serde(default)]
    pub jira_api_token: String,

    /// Xray Cloud API root
    #[serde(default = "default_xray_base_url")]
    pub xray_base_url: String,

    /// Xray client id
    #[serde(default)]
    pub client_id: String,

    /// Xray client secret
    #[serde(default)]
    pub client_secret: String,

    /// Project that receives generated test cases
    #[serde(default)]
    pub project_key: String,

    /// OAuth token for the protocol-based backend
    #[serde(default)]
    pub oauth_token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Outbound request budget per minute
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
}

fn default_xray_base_url() -> String {
    "https://xray.cloud.getxray.app".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    15
}

const fn default_requests_per_minute() -> u32 {
    60
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            jira_base_url: String::new(),
            jira_email: String::new(),
            jira_api_token: String::new(),
            xray_base_url: default_xray_base_url(),
            client_id: String::new(),
            client_secret: String::new(),
            project_key: String::new(),
            oauth_token: None,
            request_timeout_secs: default_request_timeout_secs(),
            requests_per_minute: default_requests_per_minute(),
        }
    }
}

impl TrackerConfig {
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Refresh loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerSettings {
    /// Seconds to sleep between passes
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Issue keys processed on every pass, in order
    #[serde(default)]
    pub issues: Vec<String>,

    /// Stop after this many passes (unbounded when absent)
    #[serde(default)]
    pub max_passes: Option<u64>,
}

const fn default_interval_secs() -> u64 {
    3600
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            issues: Vec::new(),
            max_passes: None,
        }
    }
}

impl SchedulerSettings {
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn issue_keys(&self) -> Vec<IssueKey> {
        self.issues.iter().map(|k| IssueKey::new(k.trim())).collect()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stdout only when absent
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
