//! Domain models.

pub mod config;
pub mod issue;
pub mod test_case;

pub use config::{BackendKind, Config, LoggingConfig, SchedulerSettings, TrackerConfig};
pub use issue::{
    normalize_fields, normalize_text, IssueContext, IssueKey, NormalizedContext, RawIssueData,
};
pub use test_case::{render_steps, TestCaseResult, TestStep};
