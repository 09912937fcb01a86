//! Protocol-based backend placeholder.
//!
//! Reserved for the tracker's upcoming protocol endpoint. Until it exists
//! every operation fails with [`BackendError::Unavailable`], so selecting
//! this backend degrades the pipeline to logged per-issue failures.

use async_trait::async_trait;

use crate::domain::errors::BackendError;
use crate::domain::models::{IssueKey, RawIssueData, TestCaseResult, TestStep};
use crate::domain::ports::BackendCapability;

/// Backend name reported in errors.
pub const MCP_BACKEND: &str = "mcp";

/// Backend that is permanently unavailable.
#[derive(Debug, Default)]
pub struct McpBackend {
    oauth_token: Option<String>,
}

impl McpBackend {
    pub fn new(oauth_token: Option<String>) -> Self {
        Self { oauth_token }
    }

    pub fn has_token(&self) -> bool {
        self.oauth_token.is_some()
    }
}

#[async_trait]
impl BackendCapability for McpBackend {
    fn name(&self) -> &str {
        MCP_BACKEND
    }

    async fn authenticate(&self) -> Result<(), BackendError> {
        Err(BackendError::unavailable(MCP_BACKEND))
    }

    async fn get_issue_data(&self, _issue_key: &IssueKey) -> Result<Option<RawIssueData>, BackendError> {
        Err(BackendError::unavailable(MCP_BACKEND))
    }

    async fn create_or_update_test_case(
        &self,
        _issue_key: &IssueKey,
        _steps: &[TestStep],
    ) -> Result<TestCaseResult, BackendError> {
        Err(BackendError::unavailable(MCP_BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unavailable(err: &BackendError) {
        match err {
            BackendError::Unavailable { backend } => assert_eq!(backend, MCP_BACKEND),
            other => panic!("Expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_every_operation_is_unavailable() {
        let backend = McpBackend::new(Some("oauth".to_string()));
        assert!(backend.has_token());

        assert_unavailable(&backend.authenticate().await.unwrap_err());

        for key in ["X-1", "X-2"] {
            let key = IssueKey::new(key);
            assert_unavailable(&backend.get_issue_data(&key).await.unwrap_err());
            let steps = vec![TestStep::new("a", "b")];
            assert_unavailable(
                &backend
                    .create_or_update_test_case(&key, &steps)
                    .await
                    .unwrap_err(),
            );
        }
    }

    #[test]
    fn test_error_message_names_capability() {
        let err = BackendError::unavailable(MCP_BACKEND);
        assert!(err.to_string().contains("not available"));
        assert!(err.to_string().contains("mcp"));
    }
}
