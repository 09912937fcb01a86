//! Native backend plugins.
//!
//! Each sub-module corresponds to a transport that implements the
//! [`BackendCapability`] port directly.

pub mod mcp;
pub mod xray;

use std::sync::Arc;

use crate::domain::errors::BackendError;
use crate::domain::models::{BackendKind, TrackerConfig};
use crate::domain::ports::BackendCapability;

use self::mcp::McpBackend;
use self::xray::{RestBackend, XrayClientConfig, XrayRestClient};

/// Create the backend instance selected by the tracker configuration.
///
/// # Errors
///
/// Returns `Err` if the REST client cannot be constructed.
pub fn create_backend(tracker: &TrackerConfig) -> Result<Arc<dyn BackendCapability>, BackendError> {
    match tracker.backend {
        BackendKind::Rest => {
            let client = XrayRestClient::new(XrayClientConfig::from(tracker))?;
            Ok(Arc::new(RestBackend::new(client, tracker.project_key.clone())))
        }
        BackendKind::Mcp => Ok(Arc::new(McpBackend::new(tracker.oauth_token.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_backend_selected_by_default() {
        let backend = create_backend(&TrackerConfig::default()).unwrap();
        assert_eq!(backend.name(), "rest");
    }

    #[test]
    fn test_mcp_backend_selected() {
        let tracker = TrackerConfig {
            backend: BackendKind::Mcp,
            ..Default::default()
        };
        let backend = create_backend(&tracker).unwrap();
        assert_eq!(backend.name(), "mcp");
    }
}
