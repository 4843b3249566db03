//! Authentication use cases: login, registration, logout.
//!
//! None of these touch the session; the caller updates it from the
//! returned outcome.

use std::sync::Arc;

use crate::adapters::ApiError;
use crate::application::messages;
use crate::domain::{Credentials, Registration, User};
use crate::ports::Backend;

/// Result of the registration flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Account created and the follow-up login succeeded.
    LoggedIn(User),
    /// Account created but the follow-up login did not go through.
    Registered(&'static str),
}

/// Service for session-changing backend calls.
pub struct AuthService<B>
where
    B: Backend,
{
    backend: Arc<B>,
}

impl<B> Clone for AuthService<B>
where
    B: Backend,
{
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> AuthService<B>
where
    B: Backend,
    B::Error: Into<ApiError>,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Log in and return the server-confirmed identity.
    ///
    /// # Errors
    /// Returns the fixed message to display.
    pub fn login(&self, credentials: &Credentials) -> Result<User, &'static str> {
        match self.backend.login(credentials) {
            Ok(reply) => {
                tracing::info!(user_type = %reply.user_type, "Login accepted");
                Ok(User::new(credentials.username.clone(), reply.user_type))
            }
            Err(e) => {
                let e: ApiError = e.into();
                tracing::warn!(error = %e, "Login failed");
                if e.is_unauthorized() {
                    Err(messages::LOGIN_REJECTED)
                } else {
                    Err(messages::LOGIN_FAILED)
                }
            }
        }
    }

    /// Create a patient account, then log in with the same credentials.
    ///
    /// # Errors
    /// Returns the fixed message to display when the account was not created.
    pub fn register(&self, registration: &Registration) -> Result<RegistrationOutcome, &'static str> {
        if let Err(e) = self.backend.register(registration) {
            let e: ApiError = e.into();
            tracing::warn!(error = %e, "Registration failed");
            return Err(if e.status() == Some(409) {
                messages::REGISTRATION_CONFLICT
            } else {
                messages::REGISTRATION_FAILED
            });
        }

        tracing::info!("Account created");
        match self.login(&registration.credentials) {
            Ok(user) => Ok(RegistrationOutcome::LoggedIn(user)),
            Err(_) => Ok(RegistrationOutcome::Registered(messages::REGISTRATION_DONE)),
        }
    }

    /// End the backend session.
    ///
    /// # Errors
    /// Returns the fixed message to display; the caller keeps its session.
    pub fn logout(&self) -> Result<(), &'static str> {
        self.backend.logout().map_err(|e| {
            let e: ApiError = e.into();
            tracing::error!(error = %e, "Logout failed");
            messages::LOGOUT_FAILED
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeBackend;
    use crate::domain::{PersonalData, UserType};
    use crate::ports::LoginReply;

    fn credentials(username: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: "pw".to_string(),
        }
    }

    #[test]
    fn test_login_returns_user_with_role() {
        let backend = Arc::new(FakeBackend {
            login_reply: Some(LoginReply {
                message: None,
                user_type: UserType::Administrador,
            }),
            ..Default::default()
        });
        let service = AuthService::new(backend);

        let user = service.login(&credentials("root")).expect("Should log in");
        assert_eq!(user, User::new("root", UserType::Administrador));
    }

    #[test]
    fn test_login_rejected() {
        let service = AuthService::new(Arc::new(FakeBackend::default()));
        assert_eq!(
            service.login(&credentials("ana")),
            Err(messages::LOGIN_REJECTED)
        );
    }

    #[test]
    fn test_registration_logs_in() {
        let backend = Arc::new(FakeBackend::patient());
        let service = AuthService::new(Arc::clone(&backend));

        let outcome = service
            .register(&Registration {
                credentials: credentials("ana"),
                personal: PersonalData::default(),
            })
            .expect("Should register");

        assert_eq!(
            outcome,
            RegistrationOutcome::LoggedIn(User::new("ana", UserType::Paciente))
        );
        assert_eq!(backend.calls(), vec!["register", "login"]);
    }

    #[test]
    fn test_registration_conflict_skips_login() {
        let backend = Arc::new(FakeBackend {
            register_status: Some(409),
            ..FakeBackend::patient()
        });
        let service = AuthService::new(Arc::clone(&backend));

        let result = service.register(&Registration {
            credentials: credentials("ana"),
            personal: PersonalData::default(),
        });
        assert_eq!(result, Err(messages::REGISTRATION_CONFLICT));
        assert_eq!(backend.calls(), vec!["register"]);
    }

    #[test]
    fn test_registration_without_follow_up_login() {
        // Registration succeeds, login is refused.
        let service = AuthService::new(Arc::new(FakeBackend::default()));
        let outcome = service
            .register(&Registration {
                credentials: credentials("ana"),
                personal: PersonalData::default(),
            })
            .expect("Should register");
        assert_eq!(
            outcome,
            RegistrationOutcome::Registered(messages::REGISTRATION_DONE)
        );
    }

    #[test]
    fn test_logout_failure_is_reported() {
        let backend = Arc::new(FakeBackend {
            fail_logout: true,
            ..Default::default()
        });
        let service = AuthService::new(backend);
        assert_eq!(service.logout(), Err(messages::LOGOUT_FAILED));
    }
}
