//! Jira and Xray Cloud request and response models.
//!
//! These structs map to the REST JSON payloads. They are used internally
//! by the REST backend and are not part of the public domain model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of the Xray Cloud token request.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticateRequest {
    pub client_id: String,
    pub client_secret: String,
}

/// An issue returned by the Jira REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIssueResponse {
    /// Issue key (e.g., "PROJ-1").
    #[serde(default)]
    pub key: Option<String>,
    /// Field map; absent when the caller lacks field permissions.
    #[serde(default)]
    pub fields: Option<Map<String, Value>>,
}

/// Project reference inside a create-test payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub key: String,
}

/// Issue type reference inside a create-test payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTypeRef {
    pub name: String,
}

/// Fields of the test issue to create or refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFields {
    pub project: ProjectRef,
    pub summary: String,
    pub description: String,
    pub issuetype: IssueTypeRef,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// A manual test step in Xray's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XrayStep {
    pub action: String,
    pub result: String,
}

/// Request body for creating or refreshing a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTestRequest {
    pub fields: TestFields,
    pub steps: Vec<XrayStep>,
}
