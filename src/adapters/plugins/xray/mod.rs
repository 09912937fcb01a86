//! Jira / Xray Cloud native backend.
//!
//! Reads issue fields through the Jira REST API and creates or refreshes
//! manual tests through the Xray Cloud REST API.

pub mod backend;
pub mod client;
pub mod models;

pub use backend::RestBackend;
pub use client::{XrayClientConfig, XrayRestClient};
