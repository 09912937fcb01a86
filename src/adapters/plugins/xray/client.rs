//! Jira / Xray Cloud HTTP client with rate limiting.
//!
//! Wraps the two REST APIs the pipeline needs: Jira for reading issue
//! fields (basic auth) and Xray Cloud for the token handshake and test
//! creation (bearer auth). A token-bucket rate limiter keeps all outbound
//! calls within the configured per-minute budget.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::domain::errors::BackendError;
use crate::domain::models::{IssueKey, TrackerConfig};
use crate::infrastructure::logging::SecretScrubber;

use super::models::{AuthenticateRequest, CreateTestRequest, JiraIssueResponse};

/// Longest remote error body kept in an error message.
const MAX_ERROR_BODY: usize = 512;

/// Token-bucket rate limiter.
///
/// Allows up to `capacity` requests per `window`. When the bucket is
/// exhausted, [`acquire`](RateLimiter::acquire) sleeps until the window
/// resets and a token becomes available.
#[derive(Debug)]
pub struct RateLimiter {
    /// Requests allowed per window.
    capacity: u32,
    /// Requests left in the current window.
    tokens: u32,
    /// Length of one budget window.
    window: Duration,
    /// Start of the current window.
    window_start: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter with the given capacity and window.
    pub fn new(capacity: u32, window: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            tokens: capacity,
            window,
            window_start: Instant::now(),
        }
    }

    /// Acquire a single token, sleeping if necessary.
    ///
    /// An elapsed window refills the bucket; an empty bucket waits out
    /// the rest of the current window.
    pub async fn acquire(&mut self) {
        let elapsed = self.window_start.elapsed();
        if elapsed >= self.window {
            // New window, full budget.
            self.tokens = self.capacity;
            self.window_start = Instant::now();
        }

        if self.tokens > 0 {
            self.tokens -= 1;
        } else {
            let remaining = self.window.saturating_sub(elapsed);
            tracing::warn!(
                sleep_ms = u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX),
                "Tracker rate limit reached, sleeping"
            );
            tokio::time::sleep(remaining).await;
            // The caller takes the first token of the fresh window.
            self.tokens = self.capacity - 1;
            self.window_start = Instant::now();
        }
    }
}

/// Connection settings for [`XrayRestClient`].
#[derive(Debug, Clone)]
pub struct XrayClientConfig {
    pub jira_base_url: String,
    pub jira_email: String,
    pub jira_api_token: String,
    pub xray_base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub timeout: Duration,
    pub requests_per_minute: u32,
}

impl From<&TrackerConfig> for XrayClientConfig {
    fn from(tracker: &TrackerConfig) -> Self {
        Self {
            jira_base_url: tracker.jira_base_url.clone(),
            jira_email: tracker.jira_email.clone(),
            jira_api_token: tracker.jira_api_token.clone(),
            xray_base_url: tracker.xray_base_url.clone(),
            client_id: tracker.client_id.clone(),
            client_secret: tracker.client_secret.clone(),
            timeout: tracker.request_timeout(),
            requests_per_minute: tracker.requests_per_minute,
        }
    }
}

/// HTTP client for Jira REST v2 and Xray Cloud REST v2.
///
/// Holds no session state; the bearer token is passed in by the caller.
#[derive(Debug, Clone)]
pub struct XrayRestClient {
    http: Client,
    config: XrayClientConfig,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    scrubber: SecretScrubber,
}

impl XrayRestClient {
    /// Build a client; fails only if the TLS backend cannot initialize.
    pub fn new(config: XrayClientConfig) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("context-engine/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Configuration(format!("HTTP client build failed: {e}")))?;
        let rate_limiter = RateLimiter::new(config.requests_per_minute, Duration::from_secs(60));
        Ok(Self {
            http,
            config,
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
            scrubber: SecretScrubber::new(),
        })
    }

    /// Jira issue URL with the key as a single escaped path segment.
    fn issue_url(&self, issue_key: &IssueKey) -> Result<Url, BackendError> {
        let mut url = Url::parse(&self.config.jira_base_url).map_err(|e| {
            BackendError::Configuration(format!(
                "invalid jira_base_url '{}': {e}",
                self.config.jira_base_url
            ))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                BackendError::Configuration(format!(
                    "jira_base_url '{}' cannot carry a path",
                    self.config.jira_base_url
                ))
            })?
            .pop_if_empty()
            .extend(["rest", "api", "2", "issue", issue_key.as_str()]);
        Ok(url)
    }

    fn xray_url(&self, path: &str) -> String {
        format!("{}{}", self.config.xray_base_url.trim_end_matches('/'), path)
    }

    /// Acquire a rate-limit token and build a request.
    async fn rate_limited_request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.rate_limiter.lock().await.acquire().await;
        tracing::debug!(method = %method, url = url, "Tracker request");
        self.http
            .request(method, url)
            .header("Accept", "application/json")
    }

    /// Turn a non-success response into a [`BackendError::Status`].
    async fn check_status(&self, operation: &'static str, resp: Response) -> Result<Response, BackendError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let mut body = self.scrubber.scrub(&body);
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|i| body.is_char_boundary(*i))
                .unwrap_or(0);
            body.truncate(cut);
            body.push_str("...");
        }
        Err(BackendError::Status {
            operation,
            status,
            body,
        })
    }

    /// Exchange client credentials for a bearer token.
    ///
    /// Xray answers with the token as a JSON string.
    pub async fn authenticate(&self) -> Result<String, BackendError> {
        let url = self.xray_url("/api/v2/authenticate");
        let body = AuthenticateRequest {
            client_id: self.config.client_id.clone(),
            client_secret: self.config.client_secret.clone(),
        };

        let resp = self
            .rate_limited_request(reqwest::Method::POST, &url)
            .await
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Request {
                operation: "authenticate",
                message: e.to_string(),
            })?;

        let resp = self.check_status("authenticate", resp).await.map_err(|e| {
            BackendError::AuthenticationFailed(e.to_string())
        })?;

        let text = resp.text().await.map_err(|e| BackendError::Decode {
            operation: "authenticate",
            message: e.to_string(),
        })?;
        let token = serde_json::from_str::<String>(&text).unwrap_or_else(|_| text.trim().to_string());
        if token.is_empty() {
            return Err(BackendError::AuthenticationFailed(
                "token endpoint returned an empty token".to_string(),
            ));
        }
        Ok(token)
    }

    /// Fetch a Jira issue. Returns `None` for 404.
    pub async fn get_issue(&self, issue_key: &IssueKey) -> Result<Option<JiraIssueResponse>, BackendError> {
        let url = self.issue_url(issue_key)?;

        let resp = self
            .rate_limited_request(reqwest::Method::GET, url.as_str())
            .await
            .basic_auth(&self.config.jira_email, Some(&self.config.jira_api_token))
            .send()
            .await
            .map_err(|e| BackendError::Request {
                operation: "get_issue",
                message: e.to_string(),
            })?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = self.check_status("get_issue", resp).await?;

        resp.json::<JiraIssueResponse>()
            .await
            .map(Some)
            .map_err(|e| BackendError::Decode {
                operation: "get_issue",
                message: e.to_string(),
            })
    }

    /// Create or refresh a test in Xray Cloud.
    pub async fn create_test(&self, token: &str, request: &CreateTestRequest) -> Result<Value, BackendError> {
        let url = self.xray_url("/api/v2/test");

        let resp = self
            .rate_limited_request(reqwest::Method::POST, &url)
            .await
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Request {
                operation: "create_test",
                message: e.to_string(),
            })?;

        let resp = self.check_status("create_test", resp).await?;

        let text = resp.text().await.map_err(|e| BackendError::Decode {
            operation: "create_test",
            message: e.to_string(),
        })?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| BackendError::Decode {
            operation: "create_test",
            message: e.to_string(),
        })
    }
}
