//! Derives test steps from issue context and writes the test case.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::models::{IssueContext, NormalizedContext, TestCaseResult, TestStep};
use crate::domain::ports::StepStrategy;

use super::context_adapter::ContextAdapter;

/// Label used when an issue has no usable summary.
pub const UNNAMED_ISSUE: &str = "Unnamed issue";

/// Default step derivation: opens the issue and reviews its description.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderStepStrategy;

impl StepStrategy for PlaceholderStepStrategy {
    fn derive_steps(&self, context: &NormalizedContext) -> Vec<TestStep> {
        let summary = context
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or(UNNAMED_ISSUE);
        vec![
            TestStep::new(format!("Open issue: {summary}"), "Issue loads successfully"),
            TestStep::new("Review description", "Details match acceptance criteria"),
        ]
    }
}

/// Generates and stores test cases for analyzed issues.
#[derive(Clone)]
pub struct TestCaseGenerator {
    adapter: ContextAdapter,
    strategy: Arc<dyn StepStrategy>,
}

impl TestCaseGenerator {
    /// Generator using [`PlaceholderStepStrategy`].
    pub fn new(adapter: ContextAdapter) -> Self {
        Self::with_strategy(adapter, Arc::new(PlaceholderStepStrategy))
    }

    pub fn with_strategy(adapter: ContextAdapter, strategy: Arc<dyn StepStrategy>) -> Self {
        Self { adapter, strategy }
    }

    /// Generate and store the test case for one issue context.
    ///
    /// Returns `None` without contacting the backend when the context is
    /// missing its key or data, and `None` when the backend write fails.
    pub async fn generate_test_case(&self, issue_context: &IssueContext) -> Option<TestCaseResult> {
        let issue_key = &issue_context.issue_key;
        if issue_key.is_blank() || issue_context.is_empty() {
            tracing::error!(issue_key = %issue_key, "Invalid issue context data");
            return None;
        }

        tracing::info!(issue_key = %issue_key, "Generating test case");
        let steps = self.strategy.derive_steps(&issue_context.context);

        match self.adapter.create_or_update_test_case(issue_key, &steps).await {
            Ok(result) => {
                tracing::info!(
                    issue_key = %issue_key,
                    steps = steps.len(),
                    remote_key = result.remote_key().unwrap_or("-"),
                    "Test case stored"
                );
                Some(result)
            }
            Err(e) => {
                tracing::error!(issue_key = %issue_key, error = %e, "Test case generation failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for TestCaseGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCaseGenerator")
            .field("adapter", &self.adapter)
            .finish_non_exhaustive()
    }
}
