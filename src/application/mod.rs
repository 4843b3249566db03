//! Application layer: Use cases and services.
//!
//! Services call the backend through the `Backend` port and convert any
//! failure into the fixed message of the page that issued the call. Errors
//! are logged here and never propagated to the UI as values.

mod auth;
mod clinical;
pub mod messages;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthService, RegistrationOutcome};
pub use clinical::ClinicalService;
