//! Domain layer: Core types of the client.
//!
//! Pure Rust types with serde derives; no I/O.

mod diagnosis;
mod patient;
mod session;
pub mod timestamp;

pub use diagnosis::{
    confidence_percent, format_measure, DiagnosisOutcome, DiagnosisRequest, DiagnosticRecord,
    LatestDiagnosis, RiskLevel,
};
pub use patient::{Credentials, PatientSummary, PersonalData, Registration};
pub use session::{Session, User, UserType};

use serde::{Deserialize, Deserializer};

/// Text column that may arrive as `null`; read as an empty string.
pub(crate) fn de_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
