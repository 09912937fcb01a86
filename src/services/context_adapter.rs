//! Transport-agnostic facade over a backend capability.
//!
//! Services talk to the tracker only through [`ContextAdapter`]. Backend
//! errors are logged here with their transport detail and handed upward as
//! the uniform [`AdapterError`].

use std::sync::Arc;

use crate::adapters::plugins::create_backend;
use crate::domain::errors::{AdapterError, BackendError};
use crate::domain::models::{IssueKey, RawIssueData, TestCaseResult, TestStep, TrackerConfig};
use crate::domain::ports::BackendCapability;

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Wraps the configured backend capability.
#[derive(Clone)]
pub struct ContextAdapter {
    backend: Arc<dyn BackendCapability>,
}

impl ContextAdapter {
    /// Wrap an existing backend.
    pub fn new(backend: Arc<dyn BackendCapability>) -> Self {
        Self { backend }
    }

    /// Build the backend selected by configuration and wrap it.
    pub fn from_config(tracker: &TrackerConfig) -> Result<Self, BackendError> {
        Ok(Self::new(create_backend(tracker)?))
    }

    /// Name of the wrapped backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Authenticate the backend. Failure is logged and reported as `false`.
    pub async fn authenticate(&self) -> bool {
        match self.backend.authenticate().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(backend = self.backend.name(), error = %e, "Authentication failed");
                false
            }
        }
    }

    /// Fetch raw issue fields. `Ok(None)` is the "no data" outcome.
    pub async fn get_issue_data(&self, issue_key: &IssueKey) -> AdapterResult<Option<RawIssueData>> {
        match self.backend.get_issue_data(issue_key).await {
            Ok(Some(fields)) if !fields.is_empty() => Ok(Some(fields)),
            Ok(_) => Ok(None),
            Err(e) => Err(self.translate("get_issue_data", issue_key, &e)),
        }
    }

    /// Create or refresh the test case of an issue.
    pub async fn create_or_update_test_case(
        &self,
        issue_key: &IssueKey,
        steps: &[TestStep],
    ) -> AdapterResult<TestCaseResult> {
        self.backend
            .create_or_update_test_case(issue_key, steps)
            .await
            .map_err(|e| self.translate("create_or_update_test_case", issue_key, &e))
    }

    fn translate(&self, operation: &'static str, issue_key: &IssueKey, err: &BackendError) -> AdapterError {
        tracing::error!(
            backend = self.backend.name(),
            operation = operation,
            issue_key = %issue_key,
            error = %err,
            "Backend call failed"
        );
        AdapterError::from_backend(operation, err)
    }
}

impl std::fmt::Debug for ContextAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextAdapter")
            .field("backend", &self.backend.name())
            .finish()
    }
}
