//! HTTP adapter: Implementation of `Backend` over the REST API.
//!
//! A single `reqwest` blocking client is configured once with the base
//! address, JSON headers and a cookie store, so the backend session cookie
//! set by `/login` is forwarded on every later request. Calls are made from
//! worker threads, never from the UI loop.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Credentials, DiagnosisOutcome, DiagnosisRequest, DiagnosticRecord, LatestDiagnosis,
    PatientSummary, PersonalData, Registration,
};
use crate::ports::{Backend, LoginReply, MessageReply};

/// Error type for backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded {status}: {}", message.as_deref().unwrap_or("(no message)"))]
    Status { status: u16, message: Option<String> },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid endpoint {0}")]
    Endpoint(String),
}

impl ApiError {
    /// HTTP status, when the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401 or 403.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

#[derive(Deserialize)]
struct PatientsEnvelope {
    #[serde(default)]
    pacientes: Vec<PatientSummary>,
}

#[derive(Deserialize)]
struct ResultEnvelope {
    #[serde(default)]
    diagnostico: Option<LatestDiagnosis>,
}

/// reqwest-backed implementation of [`Backend`].
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Build the client for the given base address.
    ///
    /// The base URL should end with `/` (see `ClientConfig`); endpoint paths
    /// are joined relative to it.
    ///
    /// # Errors
    /// Returns error if the TLS backend cannot be initialized.
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(None::<Duration>)
            .build()?;

        tracing::info!(base_url = %base_url, "HTTP backend configured");
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Endpoint(format!("{path}: {e}")))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.client.get(self.endpoint(path)?);
        self.execute(path, request)
    }

    fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.client.post(self.endpoint(path)?).json(body);
        self.execute(path, request)
    }

    fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "Sending request");
        let response = request.send()?;
        let body = Self::read_body(path, response)?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(path, error = %e, "Response body did not match expected shape");
            ApiError::Decode(e.to_string())
        })
    }

    fn read_body(path: &str, response: Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text()?;

        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<MessageReply>(&body)
            .ok()
            .and_then(|m| m.message);
        tracing::warn!(path, status = status.as_u16(), "Request rejected by backend");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl Backend for HttpBackend {
    type Error = ApiError;

    fn login(&self, credentials: &Credentials) -> Result<LoginReply, ApiError> {
        self.post("login", credentials)
    }

    fn register(&self, registration: &Registration) -> Result<MessageReply, ApiError> {
        self.post("registro", registration)
    }

    fn logout(&self) -> Result<(), ApiError> {
        let path = "logout";
        let response = self.client.post(self.endpoint(path)?).send()?;
        Self::read_body(path, response).map(|_| ())
    }

    fn submit_diagnosis(&self, request: &DiagnosisRequest) -> Result<DiagnosisOutcome, ApiError> {
        self.post("diagnostico", request)
    }

    fn latest_result(&self) -> Result<Option<LatestDiagnosis>, ApiError> {
        self.get::<ResultEnvelope>("resultados")
            .map(|envelope| envelope.diagnostico)
    }

    fn list_patients(&self, filter: Option<&str>) -> Result<Vec<PatientSummary>, ApiError> {
        let path = "admin";
        let mut request = self.client.get(self.endpoint(path)?);
        if let Some(f) = filter.map(str::trim).filter(|f| !f.is_empty()) {
            request = request.query(&[("filtro", f)]);
        }
        self.execute::<PatientsEnvelope>(path, request)
            .map(|envelope| envelope.pacientes)
    }

    fn patient_history(&self, patient_id: i64) -> Result<Vec<DiagnosticRecord>, ApiError> {
        self.get::<Option<Vec<DiagnosticRecord>>>(&format!("admin/diagnosticos/{patient_id}"))
            .map(Option::unwrap_or_default)
    }

    fn personal_data(&self) -> Result<PersonalData, ApiError> {
        self.get("configuracion")
    }

    fn update_personal_data(&self, data: &PersonalData) -> Result<MessageReply, ApiError> {
        self.post("configuracion", data)
    }
}
