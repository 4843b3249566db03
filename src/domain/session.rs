//! Session state: the last server-confirmed identity of this client.
//!
//! The session is owned by the application root and handed to every view
//! by shared reference. Only the login/registration/logout response
//! handlers mutate it. It performs no I/O and is never persisted; a new
//! process always starts logged out.

use serde::{Deserialize, Serialize};

/// Role of an authenticated user, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Regular patient account
    Paciente,
    /// Administrator with access to the patient panel
    Administrador,
}

impl UserType {
    /// Whether this role may open the administrator panel.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Administrador)
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paciente => write!(f, "paciente"),
            Self::Administrador => write!(f, "administrador"),
        }
    }
}

/// Authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub user_type: UserType,
}

impl User {
    #[must_use]
    pub fn new(username: impl Into<String>, user_type: UserType) -> Self {
        Self {
            username: username.into(),
            user_type,
        }
    }
}

/// In-memory session mirror.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// Create an empty (logged out) session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Role of the current user, if any.
    #[must_use]
    pub fn user_type(&self) -> Option<UserType> {
        self.user.as_ref().map(|u| u.user_type)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Record a server-confirmed identity.
    pub fn login(&mut self, user: User) {
        tracing::info!(user_type = %user.user_type, "Session started");
        self.user = Some(user);
    }

    /// Forget the current identity.
    pub fn logout(&mut self) {
        if self.user.take().is_some() {
            tracing::info!("Session cleared");
        }
    }
}
