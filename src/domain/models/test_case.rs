//! Generated test case models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::issue::IssueKey;

/// A single step of a generated test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestStep {
    /// What the tester does.
    pub action: String,
    /// What the tester should observe.
    pub expected: String,
}

impl TestStep {
    pub fn new(action: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            expected: expected.into(),
        }
    }
}

/// Render steps as a numbered plain-text body.
pub fn render_steps(steps: &[TestStep]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}\n   Expected: {}", i + 1, step.action, step.expected))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result of a create-or-update call, as returned by the backend.
///
/// The payload is opaque to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseResult {
    /// Issue the test case was generated for.
    pub issue_key: IssueKey,
    /// Backend response body.
    pub payload: Value,
}

impl TestCaseResult {
    pub fn new(issue_key: IssueKey, payload: Value) -> Self {
        Self { issue_key, payload }
    }

    /// Remote identifier of the artifact, if the backend reported one.
    pub fn remote_key(&self) -> Option<&str> {
        self.payload
            .get("key")
            .or_else(|| self.payload.get("id"))
            .and_then(Value::as_str)
    }
}
