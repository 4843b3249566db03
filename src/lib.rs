//! # Salud del Corazón
//!
//! Terminal client for the Salud del Corazón cardiovascular-risk service.
//!
//! This crate provides:
//! - Login, registration and logout against the backend session API
//! - A diagnosis form and a results view with a confidence donut
//! - An administrator panel listing patients and their diagnostic history
//! - Personal data settings
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: View models and the in-memory session
//! - `ports`: The `Backend` trait
//! - `adapters`: reqwest implementation of `Backend`, log sanitization
//! - `application`: Use cases turning backend calls into page outcomes
//! - `tui`: Terminal user interface
//! - `config`: Environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{RiskLevel, Session, User, UserType};

/// Result type for client operations
pub type Result<T> = std::result::Result<T, CardioError>;

/// Main error type for the client
#[derive(Debug, thiserror::Error)]
pub enum CardioError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Backend error: {0}")]
    Api(#[from] adapters::ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
