//! In-memory backend for tests.

use std::sync::Mutex;

use crate::adapters::ApiError;
use crate::domain::{
    Credentials, DiagnosisOutcome, DiagnosisRequest, DiagnosticRecord, LatestDiagnosis,
    PatientSummary, PersonalData, Registration, RiskLevel, UserType,
};
use crate::ports::{Backend, LoginReply, MessageReply};

/// Canned backend. A `None` canned value answers with an error status.
#[derive(Default)]
pub struct FakeBackend {
    /// `None` => 401
    pub login_reply: Option<LoginReply>,
    /// `Some(status)` => registration fails with that status
    pub register_status: Option<u16>,
    pub fail_logout: bool,
    /// `None` => 500
    pub outcome: Option<DiagnosisOutcome>,
    pub latest: Option<LatestDiagnosis>,
    pub fail_results: bool,
    /// `None` => 403
    pub patients: Option<Vec<PatientSummary>>,
    /// `None` => 500
    pub history: Option<Vec<DiagnosticRecord>>,
    /// `None` => 404
    pub personal: Option<PersonalData>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    /// Backend that accepts any login as a patient.
    pub fn patient() -> Self {
        Self {
            login_reply: Some(LoginReply {
                message: Some("Inicio de sesión exitoso".into()),
                user_type: UserType::Paciente,
            }),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: impl Into<String>) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.into());
        }
    }
}

fn status(status: u16) -> ApiError {
    ApiError::Status {
        status,
        message: None,
    }
}

impl Backend for FakeBackend {
    type Error = ApiError;

    fn login(&self, _credentials: &Credentials) -> Result<LoginReply, ApiError> {
        self.record("login");
        self.login_reply.clone().ok_or_else(|| status(401))
    }

    fn register(&self, _registration: &Registration) -> Result<MessageReply, ApiError> {
        self.record("register");
        match self.register_status {
            Some(code) => Err(status(code)),
            None => Ok(MessageReply::default()),
        }
    }

    fn logout(&self) -> Result<(), ApiError> {
        self.record("logout");
        if self.fail_logout {
            Err(status(500))
        } else {
            Ok(())
        }
    }

    fn submit_diagnosis(&self, _request: &DiagnosisRequest) -> Result<DiagnosisOutcome, ApiError> {
        self.record("submit_diagnosis");
        self.outcome.ok_or_else(|| status(500))
    }

    fn latest_result(&self) -> Result<Option<LatestDiagnosis>, ApiError> {
        self.record("latest_result");
        if self.fail_results {
            Err(status(401))
        } else {
            Ok(self.latest.clone())
        }
    }

    fn list_patients(&self, filter: Option<&str>) -> Result<Vec<PatientSummary>, ApiError> {
        match filter {
            Some(f) => self.record(format!("list_patients:{f}")),
            None => self.record("list_patients"),
        }
        self.patients.clone().ok_or_else(|| status(403))
    }

    fn patient_history(&self, patient_id: i64) -> Result<Vec<DiagnosticRecord>, ApiError> {
        self.record(format!("patient_history:{patient_id}"));
        self.history.clone().ok_or_else(|| status(500))
    }

    fn personal_data(&self) -> Result<PersonalData, ApiError> {
        self.record("personal_data");
        self.personal.clone().ok_or_else(|| status(404))
    }

    fn update_personal_data(&self, _data: &PersonalData) -> Result<MessageReply, ApiError> {
        self.record("update_personal_data");
        if self.personal.is_some() {
            Ok(MessageReply::default())
        } else {
            Err(status(500))
        }
    }
}

pub fn sample_record(riesgo: RiskLevel) -> DiagnosticRecord {
    DiagnosticRecord {
        fecha_diagnostico: "2024-10-15 10:30:05".into(),
        ps: 135.0,
        pd: 85.0,
        colesterol: 210.0,
        glucosa: 98.0,
        actividad: "1-2 veces por semana".into(),
        peso: 80.5,
        estatura: 175.0,
        riesgo,
        confianza: 0.9134,
        edad: Some(52.0),
        genero: Some("masculino".into()),
        fuma: Some("n".into()),
        alcohol: Some("s".into()),
        imc: Some(26.3),
    }
}

pub fn sample_patient(id: i64, username: &str) -> PatientSummary {
    PatientSummary {
        id,
        username: username.into(),
        first_name: "Ana".into(),
        last_name: "Pérez".into(),
        diagnosis_count: 2,
        last_diagnosis: Some("2024-10-15 10:30:05".into()),
    }
}
