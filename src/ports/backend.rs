//! Backend port: Trait for every call the client makes to the REST API.
//!
//! This trait abstracts the HTTP transport (reqwest) from the application
//! services, so pages can be driven by an in-memory fake in tests.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Credentials, DiagnosisOutcome, DiagnosisRequest, DiagnosticRecord, LatestDiagnosis,
    PatientSummary, PersonalData, Registration, UserType,
};

/// Body of a successful `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub message: Option<String>,
    pub user_type: UserType,
}

/// Generic `{ "message": ... }` body returned by mutating endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReply {
    #[serde(default)]
    pub message: Option<String>,
}

/// Trait for backend operations.
///
/// Every request carries the session cookie held by the implementation.
/// Implementations perform no retries.
pub trait Backend: Send + Sync {
    /// Error type for backend operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// `POST /login`
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success status.
    fn login(&self, credentials: &Credentials) -> Result<LoginReply, Self::Error>;

    /// `POST /registro`
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success status.
    fn register(&self, registration: &Registration) -> Result<MessageReply, Self::Error>;

    /// `POST /logout`
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success status.
    fn logout(&self) -> Result<(), Self::Error>;

    /// `POST /diagnostico`
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success status.
    fn submit_diagnosis(&self, request: &DiagnosisRequest) -> Result<DiagnosisOutcome, Self::Error>;

    /// `GET /resultados`. `None` when the patient has no diagnosis yet.
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success status.
    fn latest_result(&self) -> Result<Option<LatestDiagnosis>, Self::Error>;

    /// `GET /admin`, optionally filtered by username or name.
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success status.
    fn list_patients(&self, filter: Option<&str>) -> Result<Vec<PatientSummary>, Self::Error>;

    /// `GET /admin/diagnosticos/:patient_id`, newest first.
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success status.
    fn patient_history(&self, patient_id: i64) -> Result<Vec<DiagnosticRecord>, Self::Error>;

    /// `GET /configuracion`
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success status.
    fn personal_data(&self) -> Result<PersonalData, Self::Error>;

    /// `POST /configuracion`
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success status.
    fn update_personal_data(&self, data: &PersonalData) -> Result<MessageReply, Self::Error>;
}
