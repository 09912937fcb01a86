//! Context Engine - keeps Xray test cases in step with Jira issues
//!
//! On a fixed interval the engine pulls the current data of every tracked
//! issue, normalizes it into a context, derives test steps from that context
//! and upserts the resulting test case through the configured backend.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): issue and test-case models, errors, ports
//! - **Adapters** (`adapters`): tracker backends behind [`domain::ports::BackendCapability`]
//! - **Service Layer** (`services`): adapter, analyzer, generator and scheduler
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use context_engine::services::{
//!     ContextAdapter, ContextAnalyzer, ContextScheduler, TestCaseGenerator,
//! };
//!
//! let adapter = ContextAdapter::from_config(&config.tracker)?;
//! adapter.authenticate().await;
//! let scheduler = ContextScheduler::with_defaults(
//!     ContextAnalyzer::new(adapter.clone()),
//!     TestCaseGenerator::new(adapter),
//! );
//! scheduler.run(&config.scheduler.issue_keys()).await;
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, IssueContext, IssueKey, NormalizedContext, RawIssueData, TestCaseResult, TestStep,
};
pub use domain::ports::{BackendCapability, StepStrategy};
pub use domain::{AdapterError, BackendError, DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    ContextAdapter, ContextAnalyzer, ContextScheduler, SchedulerConfig, TestCaseGenerator,
};
