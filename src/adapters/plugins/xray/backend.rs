//! REST backend capability.
//!
//! Reads issue fields from Jira and writes generated tests to Xray Cloud.
//! The bearer token obtained by [`authenticate`](BackendCapability::authenticate)
//! is the only state kept between calls.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::BackendError;
use crate::domain::models::{render_steps, IssueKey, RawIssueData, TestCaseResult, TestStep};
use crate::domain::ports::BackendCapability;

use super::client::XrayRestClient;
use super::models::{CreateTestRequest, IssueTypeRef, ProjectRef, TestFields, XrayStep};

/// Label attached to every generated test.
pub const GENERATED_LABEL: &str = "context-engine";

/// Backend capability over the Jira and Xray Cloud REST APIs.
#[derive(Debug)]
pub struct RestBackend {
    client: XrayRestClient,
    project_key: String,
    token: RwLock<Option<String>>,
}

impl RestBackend {
    pub fn new(client: XrayRestClient, project_key: impl Into<String>) -> Self {
        Self {
            client,
            project_key: project_key.into(),
            token: RwLock::new(None),
        }
    }

    /// Whether a bearer token is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    async fn bearer_token(&self) -> Result<String, BackendError> {
        self.token
            .read()
            .await
            .clone()
            .ok_or(BackendError::NotAuthenticated)
    }

    /// Build the create-or-update payload for an issue.
    pub fn build_request(&self, issue_key: &IssueKey, steps: &[TestStep]) -> CreateTestRequest {
        CreateTestRequest {
            fields: TestFields {
                project: ProjectRef {
                    key: self.project_key.clone(),
                },
                summary: format!("Test: {issue_key}"),
                description: render_steps(steps),
                issuetype: IssueTypeRef {
                    name: "Test".to_string(),
                },
                labels: vec![GENERATED_LABEL.to_string(), issue_key.to_string()],
            },
            steps: steps
                .iter()
                .map(|step| XrayStep {
                    action: step.action.clone(),
                    result: step.expected.clone(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl BackendCapability for RestBackend {
    fn name(&self) -> &str {
        "rest"
    }

    async fn authenticate(&self) -> Result<(), BackendError> {
        // The lock is only taken to store the outcome; a failed attempt
        // drops any previous token.
        let outcome = self.client.authenticate().await;
        let mut guard = self.token.write().await;
        match outcome {
            Ok(token) => {
                *guard = Some(token);
                tracing::info!("Authenticated with Xray Cloud");
                Ok(())
            }
            Err(e) => {
                *guard = None;
                Err(e)
            }
        }
    }

    async fn get_issue_data(&self, issue_key: &IssueKey) -> Result<Option<RawIssueData>, BackendError> {
        // The token gates every call, including Jira reads.
        self.bearer_token().await?;

        let issue = self.client.get_issue(issue_key).await?;
        Ok(issue
            .and_then(|issue| issue.fields)
            .filter(|fields| !fields.is_empty()))
    }

    async fn create_or_update_test_case(
        &self,
        issue_key: &IssueKey,
        steps: &[TestStep],
    ) -> Result<TestCaseResult, BackendError> {
        let token = self.bearer_token().await?;
        let request = self.build_request(issue_key, steps);
        let payload = self.client.create_test(&token, &request).await?;
        Ok(TestCaseResult::new(issue_key.clone(), payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::plugins::xray::client::XrayClientConfig;
    use std::time::Duration;

    fn backend() -> RestBackend {
        let client = XrayRestClient::new(XrayClientConfig {
            jira_base_url: "http://127.0.0.1:9".to_string(),
            jira_email: String::new(),
            jira_api_token: String::new(),
            xray_base_url: "http://127.0.0.1:9".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            timeout: Duration::from_secs(1),
            requests_per_minute: 60,
        })
        .unwrap();
        RestBackend::new(client, "QA")
    }

    #[test]
    fn test_build_request_maps_steps() {
        let backend = backend();
        let steps = vec![
            TestStep::new("Open issue: Login", "Issue loads successfully"),
            TestStep::new("Review description", "Details match acceptance criteria"),
        ];
        let request = backend.build_request(&IssueKey::new("PROJ-1"), &steps);
        assert_eq!(request.fields.project.key, "QA");
        assert_eq!(request.fields.summary, "Test: PROJ-1");
        assert_eq!(request.fields.issuetype.name, "Test");
        assert_eq!(request.fields.labels, vec!["context-engine", "PROJ-1"]);
        assert_eq!(request.steps.len(), 2);
        assert_eq!(request.steps[1].result, "Details match acceptance criteria");
        assert!(request.fields.description.contains("1. Open issue: Login"));
    }

    #[tokio::test]
    async fn test_calls_fail_before_authentication() {
        let backend = backend();
        assert!(!backend.is_authenticated().await);

        let fetch = backend.get_issue_data(&IssueKey::new("PROJ-1")).await;
        assert!(matches!(fetch, Err(BackendError::NotAuthenticated)));

        let create = backend
            .create_or_update_test_case(&IssueKey::new("PROJ-1"), &[])
            .await;
        assert!(matches!(create, Err(BackendError::NotAuthenticated)));
    }
}
