//! Background request worker.
//!
//! Backend calls block, so each one runs on its own short-lived thread and
//! reports back over a channel the UI loop drains every tick. There is no
//! cancellation: a response that arrives after the user navigated away is
//! still delivered and simply updates its page's state.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::application::RegistrationOutcome;
use crate::domain::{
    DiagnosisOutcome, DiagnosticRecord, LatestDiagnosis, PatientSummary, PersonalData, User,
};

/// Completed backend call, already converted to a page outcome.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    LoggedIn(Result<User, &'static str>),
    Registered(Result<RegistrationOutcome, &'static str>),
    LoggedOut(Result<(), &'static str>),
    Diagnosed(Result<DiagnosisOutcome, &'static str>),
    ResultsLoaded(Result<Option<LatestDiagnosis>, &'static str>),
    PatientsLoaded(Result<Vec<PatientSummary>, &'static str>),
    HistoryLoaded {
        patient_id: i64,
        result: Result<Vec<DiagnosticRecord>, &'static str>,
    },
    SettingsLoaded(Result<PersonalData, &'static str>),
    SettingsSaved(Result<&'static str, &'static str>),
}

impl ApiEvent {
    /// Responses carrying data of the logged-in user.
    #[must_use]
    pub fn is_private(&self) -> bool {
        !matches!(
            self,
            Self::LoggedIn(_) | Self::Registered(_) | Self::LoggedOut(_)
        )
    }
}

/// Spawns request threads and collects their events.
pub struct RequestWorker {
    tx: Sender<ApiEvent>,
    rx: Receiver<ApiEvent>,
    in_flight: usize,
}

impl Default for RequestWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestWorker {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Run `job` on a background thread and queue its event.
    pub fn spawn<F>(&mut self, name: &'static str, job: F)
    where
        F: FnOnce() -> ApiEvent + Send + 'static,
    {
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("api-{name}"))
            .spawn(move || {
                // The receiver only disappears when the app is shutting down.
                let _ = tx.send(job());
            });

        match spawned {
            Ok(_) => self.in_flight += 1,
            Err(e) => tracing::error!(request = name, error = %e, "Failed to spawn request thread"),
        }
    }

    /// Next completed event, if any (non-blocking).
    pub fn try_recv(&mut self) -> Option<ApiEvent> {
        let event = self.rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(event)
    }

    /// Number of requests that have not reported back yet.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}
