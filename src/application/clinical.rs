//! Clinical use cases: diagnosis, results, admin panel, personal data.

use std::sync::Arc;

use crate::adapters::ApiError;
use crate::application::messages;
use crate::domain::{
    DiagnosisOutcome, DiagnosisRequest, DiagnosticRecord, LatestDiagnosis, PatientSummary,
    PersonalData,
};
use crate::ports::Backend;

/// Service for the data pages.
pub struct ClinicalService<B>
where
    B: Backend,
{
    backend: Arc<B>,
}

impl<B> Clone for ClinicalService<B>
where
    B: Backend,
{
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

fn report<E: Into<ApiError>>(context: &'static str, e: E) -> ApiError {
    let e: ApiError = e.into();
    tracing::warn!(error = %e, "{context}");
    e
}

impl<B> ClinicalService<B>
where
    B: Backend,
    B::Error: Into<ApiError>,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Submit the diagnosis form.
    ///
    /// # Errors
    /// Returns the fixed message to display.
    pub fn submit_diagnosis(&self, request: &DiagnosisRequest) -> Result<DiagnosisOutcome, &'static str> {
        match self.backend.submit_diagnosis(request) {
            Ok(outcome) => {
                tracing::info!(riesgo = outcome.riesgo.code(), "Diagnosis computed");
                Ok(outcome)
            }
            Err(e) => {
                let e = report("Diagnosis submission failed", e);
                if e.is_unauthorized() {
                    Err(messages::DIAGNOSIS_UNAUTHORIZED)
                } else {
                    Err(messages::DIAGNOSIS_FAILED)
                }
            }
        }
    }

    /// Latest diagnosis of the logged-in patient.
    ///
    /// # Errors
    /// Returns the fixed message to display.
    pub fn latest_result(&self) -> Result<Option<LatestDiagnosis>, &'static str> {
        self.backend
            .latest_result()
            .map_err(|e| {
                report("Loading results failed", e);
                messages::RESULTS_FAILED
            })
    }

    /// Patient list for the administrator panel.
    ///
    /// # Errors
    /// Returns the fixed message to display.
    pub fn patients(&self, filter: Option<&str>) -> Result<Vec<PatientSummary>, &'static str> {
        self.backend.list_patients(filter).map_err(|e| {
            report("Loading patient list failed", e);
            messages::ADMIN_LOAD_FAILED
        })
    }

    /// Diagnostic history of one patient.
    ///
    /// # Errors
    /// Returns the fixed message to display.
    pub fn history(&self, patient_id: i64) -> Result<Vec<DiagnosticRecord>, &'static str> {
        self.backend.patient_history(patient_id).map_err(|e| {
            report("Loading patient history failed", e);
            messages::HISTORY_LOAD_FAILED
        })
    }

    /// Personal data of the logged-in user.
    ///
    /// # Errors
    /// Returns the fixed message to display.
    pub fn personal_data(&self) -> Result<PersonalData, &'static str> {
        self.backend.personal_data().map_err(|e| {
            report("Loading personal data failed", e);
            messages::SETTINGS_LOAD_FAILED
        })
    }

    /// Save personal data.
    ///
    /// # Errors
    /// Returns the fixed message to display.
    pub fn update_personal_data(&self, data: &PersonalData) -> Result<&'static str, &'static str> {
        self.backend
            .update_personal_data(data)
            .map(|_| messages::SETTINGS_SAVED)
            .map_err(|e| {
                report("Saving personal data failed", e);
                messages::SETTINGS_SAVE_FAILED
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{sample_record, FakeBackend};
    use crate::domain::RiskLevel;

    #[test]
    fn test_admin_failure_message() {
        let service = ClinicalService::new(Arc::new(FakeBackend::default()));
        assert_eq!(service.patients(None), Err(messages::ADMIN_LOAD_FAILED));
    }

    #[test]
    fn test_admin_filter_is_forwarded() {
        let backend = Arc::new(FakeBackend {
            patients: Some(vec![]),
            ..Default::default()
        });
        let service = ClinicalService::new(Arc::clone(&backend));
        service.patients(Some("ana")).expect("Should list");
        assert_eq!(backend.calls(), vec!["list_patients:ana"]);
    }

    #[test]
    fn test_history() {
        let backend = Arc::new(FakeBackend {
            history: Some(vec![sample_record(RiskLevel::Medium)]),
            ..Default::default()
        });
        let service = ClinicalService::new(Arc::clone(&backend));
        let records = service.history(4).expect("Should load");
        assert_eq!(records.len(), 1);
        assert_eq!(backend.calls(), vec!["patient_history:4"]);

        let failing = ClinicalService::new(Arc::new(FakeBackend::default()));
        assert_eq!(failing.history(4), Err(messages::HISTORY_LOAD_FAILED));
    }

    #[test]
    fn test_latest_result_may_be_empty() {
        let service = ClinicalService::new(Arc::new(FakeBackend::default()));
        assert_eq!(service.latest_result(), Ok(None));

        let failing = ClinicalService::new(Arc::new(FakeBackend {
            fail_results: true,
            ..Default::default()
        }));
        assert_eq!(failing.latest_result(), Err(messages::RESULTS_FAILED));
    }

    #[test]
    fn test_settings_round() {
        let backend = Arc::new(FakeBackend {
            personal: Some(PersonalData {
                nombre: "Ana".into(),
                ..Default::default()
            }),
            ..Default::default()
        });
        let service = ClinicalService::new(Arc::clone(&backend));
        let data = service.personal_data().expect("Should load");
        assert_eq!(data.nombre, "Ana");
        assert_eq!(service.update_personal_data(&data), Ok(messages::SETTINGS_SAVED));

        let failing = ClinicalService::new(Arc::new(FakeBackend::default()));
        assert_eq!(failing.personal_data(), Err(messages::SETTINGS_LOAD_FAILED));
        assert_eq!(
            failing.update_personal_data(&PersonalData::default()),
            Err(messages::SETTINGS_SAVE_FAILED)
        );
    }
}
