use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::{BackendKind, Config};
use crate::infrastructure::logging::logger::parse_log_level;

/// Project-local configuration directory
pub const CONFIG_DIR: &str = ".context-engine";

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "CONTEXT_ENGINE_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid interval_secs: {0}. Must be at least 1")]
    InvalidInterval(u64),

    #[error("Invalid issue key: '{0}'. Keys cannot be empty")]
    InvalidIssueKey(String),

    #[error("Malformed issue key: '{0}'. Keys cannot contain whitespace, '/', '?', '#' or '%'")]
    MalformedIssueKey(String),

    #[error("Duplicate issue key: {0}")]
    DuplicateIssueKey(String),

    #[error("Invalid max_passes: 0. Omit the setting to run indefinitely")]
    InvalidMaxPasses,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Invalid URL for {field}: '{value}'. Must start with http:// or https://")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Missing required setting for the rest backend: tracker.{0}")]
    MissingSetting(&'static str),

    #[error("Invalid request_timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid requests_per_minute: {0}. Must be at least 1")]
    InvalidRequestRate(u32),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .context-engine/config.yaml (project config)
    /// 3. .context-engine/local.yaml (local overrides, optional)
    /// 4. Environment variables (CONTEXT_ENGINE_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        let dir = Path::new(CONFIG_DIR);
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Scheduler
        let scheduler = &config.scheduler;
        if scheduler.interval_secs == 0 {
            return Err(ConfigError::InvalidInterval(scheduler.interval_secs));
        }
        if scheduler.max_passes == Some(0) {
            return Err(ConfigError::InvalidMaxPasses);
        }
        let mut seen = HashSet::new();
        for key in &scheduler.issues {
            let trimmed = key.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidIssueKey(key.clone()));
            }
            if trimmed
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%'))
            {
                return Err(ConfigError::MalformedIssueKey(trimmed.to_string()));
            }
            if !seen.insert(trimmed) {
                return Err(ConfigError::DuplicateIssueKey(trimmed.to_string()));
            }
        }

        // Logging
        if parse_log_level(&config.logging.level).is_err() {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }
        let format = config.logging.format.to_lowercase();
        if !["json", "pretty"].contains(&format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }
        let rotation = config.logging.rotation.to_lowercase();
        if !["daily", "hourly", "never"].contains(&rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        // Tracker
        let tracker = &config.tracker;
        if tracker.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(tracker.request_timeout_secs));
        }
        if tracker.requests_per_minute == 0 {
            return Err(ConfigError::InvalidRequestRate(tracker.requests_per_minute));
        }

        if tracker.backend == BackendKind::Rest {
            Self::validate_url("jira_base_url", &tracker.jira_base_url)?;
            Self::validate_url("xray_base_url", &tracker.xray_base_url)?;
            for (field, value) in [
                ("jira_email", &tracker.jira_email),
                ("jira_api_token", &tracker.jira_api_token),
                ("client_id", &tracker.client_id),
                ("client_secret", &tracker.client_secret),
                ("project_key", &tracker.project_key),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::MissingSetting(field));
                }
            }
        }

        Ok(())
    }

    fn validate_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingSetting(field));
        }
        if !(value.starts_with("http://") || value.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                field,
                value: value.to_string(),
            });
        }
        Ok(())
    }
}
