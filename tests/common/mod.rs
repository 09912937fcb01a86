//! Common test utilities for integration tests
//!
//! Hand-written [`BackendCapability`] doubles shared by the pipeline and
//! scheduler tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use context_engine::domain::models::{IssueKey, RawIssueData, TestCaseResult, TestStep};
use context_engine::domain::ports::{BackendCapability, StepStrategy};
use context_engine::services::{
    ContextAdapter, ContextAnalyzer, ContextScheduler, SchedulerConfig, TestCaseGenerator,
};
use context_engine::BackendError;

/// In-memory backend that records every call.
///
/// Issues are served from a fixed map; keys listed in `failing` return a
/// request error and keys in `panicking` panic inside `get_issue_data`.
#[derive(Default)]
pub struct RecordingBackend {
    issues: HashMap<String, RawIssueData>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    fetches: Mutex<Vec<String>>,
    creates: Mutex<Vec<(String, Vec<TestStep>)>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `fields` for `key`.
    pub fn with_issue(mut self, key: &str, fields: Value) -> Self {
        self.issues
            .insert(key.to_string(), fields.as_object().cloned().unwrap_or_default());
        self
    }

    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn panicking_on(mut self, key: &str) -> Self {
        self.panicking.insert(key.to_string());
        self
    }

    /// Keys in the order they were fetched.
    pub fn fetched(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    /// Keys in the order test cases were written.
    pub fn created(&self) -> Vec<String> {
        self.creates
            .lock()
            .unwrap()
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn create_count(&self, key: &str) -> usize {
        self.creates
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| k == key)
            .count()
    }

    /// Steps of the most recent write for `key`.
    pub fn steps_for(&self, key: &str) -> Option<Vec<TestStep>> {
        self.creates
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, steps)| steps.clone())
    }
}

#[async_trait]
impl BackendCapability for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    async fn authenticate(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn get_issue_data(&self, issue_key: &IssueKey) -> Result<Option<RawIssueData>, BackendError> {
        let key = issue_key.as_str().to_string();
        self.fetches.lock().unwrap().push(key.clone());

        if self.panicking.contains(&key) {
            panic!("backend exploded on {key}");
        }
        if self.failing.contains(&key) {
            return Err(BackendError::Request {
                operation: "get_issue_data",
                message: format!("connection reset while fetching {key}"),
            });
        }
        Ok(self.issues.get(&key).cloned())
    }

    async fn create_or_update_test_case(
        &self,
        issue_key: &IssueKey,
        steps: &[TestStep],
    ) -> Result<TestCaseResult, BackendError> {
        let key = issue_key.as_str().to_string();
        self.creates
            .lock()
            .unwrap()
            .push((key.clone(), steps.to_vec()));
        Ok(TestCaseResult::new(
            issue_key.clone(),
            json!({ "key": format!("TC-{key}") }),
        ))
    }
}

/// Backend whose writes always fail.
pub struct RejectingBackend;

#[async_trait]
impl BackendCapability for RejectingBackend {
    fn name(&self) -> &str {
        "rejecting"
    }

    async fn authenticate(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn get_issue_data(&self, _issue_key: &IssueKey) -> Result<Option<RawIssueData>, BackendError> {
        Ok(json!({ "summary": "Anything" }).as_object().cloned())
    }

    async fn create_or_update_test_case(
        &self,
        _issue_key: &IssueKey,
        _steps: &[TestStep],
    ) -> Result<TestCaseResult, BackendError> {
        Err(BackendError::Status {
            operation: "create_test",
            status: 400,
            body: "invalid project".to_string(),
        })
    }
}

/// Wire a scheduler around `backend`.
pub fn scheduler_for(backend: Arc<dyn BackendCapability>, config: SchedulerConfig) -> ContextScheduler {
    let adapter = ContextAdapter::new(backend);
    ContextScheduler::new(
        ContextAnalyzer::new(adapter.clone()),
        TestCaseGenerator::new(adapter),
        config,
    )
}

/// Wire a scheduler whose generator derives steps with `strategy`.
pub fn scheduler_with_strategy(
    backend: Arc<dyn BackendCapability>,
    strategy: Arc<dyn StepStrategy>,
    config: SchedulerConfig,
) -> ContextScheduler {
    let adapter = ContextAdapter::new(backend);
    ContextScheduler::new(
        ContextAnalyzer::new(adapter.clone()),
        TestCaseGenerator::with_strategy(adapter, strategy),
        config,
    )
}

pub fn keys(keys: &[&str]) -> Vec<IssueKey> {
    keys.iter().map(|k| IssueKey::new(*k)).collect()
}

/// Initialize a test subscriber.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
