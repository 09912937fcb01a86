//! Domain ports (interfaces) for external dependencies.

pub mod backend;
pub mod step_strategy;

pub use backend::BackendCapability;
pub use step_strategy::StepStrategy;
