//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the backend REST API
//! - `sanitize`: credential/PII filtering for logs

pub mod http;
pub mod sanitize;

pub use http::{ApiError, HttpBackend};
