//! Domain layer for the context engine
//!
//! This module contains the pipeline's models, errors and ports.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{AdapterError, BackendError, DomainError, DomainResult};
