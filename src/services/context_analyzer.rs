//! Fetches issue data and turns it into normalized context.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{normalize_fields, IssueContext, IssueKey};

use super::context_adapter::ContextAdapter;

/// Reads issues through the adapter and cleans their fields.
#[derive(Debug, Clone)]
pub struct ContextAnalyzer {
    adapter: ContextAdapter,
}

impl ContextAnalyzer {
    pub fn new(adapter: ContextAdapter) -> Self {
        Self { adapter }
    }

    /// Fetch and normalize the context of one issue.
    ///
    /// A backend with nothing for the issue yields an empty context, not an
    /// error. Backend failures are returned as [`DomainError::Backend`].
    pub async fn extract_context(&self, issue_key: &IssueKey) -> DomainResult<IssueContext> {
        if issue_key.is_blank() {
            return Err(DomainError::InvalidIssueKey(issue_key.to_string()));
        }

        tracing::info!(issue_key = %issue_key, "Fetching issue data");
        let Some(raw) = self.adapter.get_issue_data(issue_key).await? else {
            tracing::warn!(issue_key = %issue_key, "No data found for issue");
            return Ok(IssueContext::empty(issue_key.clone()));
        };

        let context = normalize_fields(&raw);
        tracing::debug!(issue_key = %issue_key, fields = context.len(), "Issue context normalized");
        Ok(IssueContext::new(issue_key.clone(), context))
    }
}
