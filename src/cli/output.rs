//! Output formatting utilities for the CLI.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::domain::models::Config;
use crate::services::{IssueOutcome, PassReport, SchedulerStatus, StopReason};

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Create a standard list table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Truncate a string to a maximum length, appending "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Result of a single pass.
#[derive(Debug, Serialize)]
pub struct PassOutput {
    #[serde(flatten)]
    pub report: PassReport,
}

impl CommandOutput for PassOutput {
    fn to_human(&self) -> String {
        let report = &self.report;
        if report.issues.is_empty() {
            return format!("Pass {}: no issues processed.", report.pass);
        }

        let mut table = list_table(&["issue", "outcome", "detail"]);
        for issue in &report.issues {
            let (outcome, detail) = match &issue.outcome {
                IssueOutcome::Generated { remote_key } => {
                    ("generated", remote_key.clone().unwrap_or_default())
                }
                IssueOutcome::NoData => ("no data", String::new()),
                IssueOutcome::NotStored => ("not stored", "see log for backend error".to_string()),
                IssueOutcome::Failed { error } => ("failed", truncate(error, 80)),
            };
            table.add_row(vec![issue.issue_key.to_string(), outcome.to_string(), detail]);
        }

        let mut summary = format!(
            "Pass {}: {} processed, {} generated, {} failed",
            report.pass,
            report.issues.len(),
            report.generated(),
            report.failures()
        );
        if report.interrupted {
            summary.push_str(" (interrupted)");
        }
        format!("{summary}\n{table}")
    }
}

/// Result of a scheduler run.
#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub reason: StopReason,
    pub status: SchedulerStatus,
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let reason = match self.reason {
            StopReason::Requested => "stop requested",
            StopReason::PassLimitReached => "pass limit reached",
            StopReason::ConditionMet => "stop condition met",
        };
        format!(
            "Scheduler stopped ({reason}) after {} passes: {} issues processed, {} generated, {} failed",
            self.status.passes_completed,
            self.status.issues_processed,
            self.status.generated,
            self.status.failures
        )
    }
}

/// Effective configuration, already redacted.
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    #[serde(flatten)]
    pub config: Config,
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::IssueKey;
    use crate::services::IssueReport;
    use chrono::Utc;
    use uuid::Uuid;

    fn report(issues: Vec<IssueReport>) -> PassReport {
        PassReport {
            pass: 1,
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            issues,
            interrupted: false,
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long error message", 10), "a long ...");
    }

    #[test]
    fn test_pass_output_human() {
        let output = PassOutput {
            report: report(vec![
                IssueReport {
                    issue_key: IssueKey::new("A-1"),
                    outcome: IssueOutcome::Generated {
                        remote_key: Some("QA-9".to_string()),
                    },
                },
                IssueReport {
                    issue_key: IssueKey::new("A-2"),
                    outcome: IssueOutcome::Failed {
                        error: "boom".to_string(),
                    },
                },
            ]),
        };
        let text = output.to_human();
        assert!(text.contains("2 processed, 1 generated, 1 failed"));
        assert!(text.contains("QA-9"));
        assert!(text.contains("boom"));
    }

    #[test]
    fn test_empty_pass_output() {
        let output = PassOutput { report: report(vec![]) };
        assert_eq!(output.to_human(), "Pass 1: no issues processed.");
    }

    #[test]
    fn test_pass_output_json() {
        let output = PassOutput { report: report(vec![]) };
        let json = output.to_json();
        assert_eq!(json["pass"], 1);
        assert_eq!(json["interrupted"], false);
    }

    #[test]
    fn test_run_output_human() {
        let output = RunOutput {
            reason: StopReason::PassLimitReached,
            status: SchedulerStatus {
                passes_completed: 2,
                ..Default::default()
            },
        };
        assert!(output.to_human().contains("pass limit reached"));
        assert!(output.to_human().contains("after 2 passes"));
    }
}
