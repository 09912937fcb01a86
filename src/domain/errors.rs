//! Domain errors for the context engine.

use thiserror::Error;

/// Errors raised by a backend capability.
///
/// These carry transport detail (status codes, response bodies) and never
/// travel past the context adapter.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Capability not available: {backend} backend is not implemented")]
    Unavailable { backend: String },

    #[error("Backend is not authenticated")]
    NotAuthenticated,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("{operation} request failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} returned {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("{operation} response could not be decoded: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    #[error("Invalid backend configuration: {0}")]
    Configuration(String),
}

impl BackendError {
    pub fn unavailable(backend: impl Into<String>) -> Self {
        Self::Unavailable {
            backend: backend.into(),
        }
    }
}

/// Uniform failure signal exposed by the context adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    #[error("Capability not available: {backend}")]
    Unavailable { backend: String },

    #[error("Backend is not authenticated")]
    NotAuthenticated,

    #[error("{operation} failed: {cause}")]
    Failed {
        operation: &'static str,
        cause: String,
    },
}

impl AdapterError {
    /// Translate a backend error for the given adapter operation.
    pub fn from_backend(operation: &'static str, err: &BackendError) -> Self {
        match err {
            BackendError::Unavailable { backend } => Self::Unavailable {
                backend: backend.clone(),
            },
            BackendError::NotAuthenticated => Self::NotAuthenticated,
            other => Self::Failed {
                operation,
                cause: other.to_string(),
            },
        }
    }

    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Errors surfaced by the pipeline services.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid issue key: '{0}'")]
    InvalidIssueKey(String),

    #[error("Backend failure: {0}")]
    Backend(#[from] AdapterError),
}

pub type DomainResult<T> = Result<T, DomainError>;
