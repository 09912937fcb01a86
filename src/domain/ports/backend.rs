//! Backend capability port.
//!
//! The pipeline reaches the issue tracker and the test management system
//! exclusively through this trait, keeping services decoupled from the
//! transport that serves them.

use async_trait::async_trait;

use crate::domain::errors::BackendError;
use crate::domain::models::{IssueKey, RawIssueData, TestCaseResult, TestStep};

/// Port for providers that read issues and write test cases.
///
/// `authenticate` must succeed before the other operations; until it does,
/// implementations fail them with [`BackendError::NotAuthenticated`]
/// instead of issuing unauthenticated calls.
#[async_trait]
pub trait BackendCapability: Send + Sync {
    /// Short identifier used in logs and errors (e.g. `"rest"`).
    fn name(&self) -> &str;

    /// Establish credentials for subsequent calls.
    async fn authenticate(&self) -> Result<(), BackendError>;

    /// Fetch the field map of an issue.
    ///
    /// `Ok(None)` means the issue has no data; this is not an error.
    async fn get_issue_data(&self, issue_key: &IssueKey) -> Result<Option<RawIssueData>, BackendError>;

    /// Create the test case for an issue, or refresh the existing one.
    async fn create_or_update_test_case(
        &self,
        issue_key: &IssueKey,
        steps: &[TestStep],
    ) -> Result<TestCaseResult, BackendError>;
}
