//! Service layer: the context refresh pipeline.

pub mod context_adapter;
pub mod context_analyzer;
pub mod context_scheduler;
pub mod test_case_generator;

pub use context_adapter::{AdapterResult, ContextAdapter};
pub use context_analyzer::ContextAnalyzer;
pub use context_scheduler::{
    ContextScheduler, IssueOutcome, IssueReport, PassReport, SchedulerConfig, SchedulerHandle,
    SchedulerState, SchedulerStatus, StopCondition, StopReason,
};
pub use test_case_generator::{PlaceholderStepStrategy, TestCaseGenerator, UNNAMED_ISSUE};
