//! Step derivation port.

use crate::domain::models::{NormalizedContext, TestStep};

/// Derives ordered test steps from a normalized issue context.
///
/// Implemented for plain closures so callers can swap derivation logic
/// without a dedicated type.
pub trait StepStrategy: Send + Sync {
    fn derive_steps(&self, context: &NormalizedContext) -> Vec<TestStep>;
}

impl<F> StepStrategy for F
where
    F: Fn(&NormalizedContext) -> Vec<TestStep> + Send + Sync,
{
    fn derive_steps(&self, context: &NormalizedContext) -> Vec<TestStep> {
        self(context)
    }
}
