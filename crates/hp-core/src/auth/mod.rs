//! Authentication domain types.
//!
//! The authentication service itself is external. These types describe what
//! crosses the port boundary: the session handed back on success and a
//! structured error kind on failure, so callers choose user messaging by
//! matching on [`AuthErrorKind`] instead of inspecting error text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::security::SecretString;

/// Failure category reported by the authentication service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthErrorKind {
    InvalidCredentials,
    DuplicateAccount,
    Timeout,
    Network,
    Server,
    Unknown,
}

impl AuthErrorKind {
    /// Transport-level failures that may succeed on a plain retry.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Timeout | Self::Network)
    }

    /// User-facing message for this failure category.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "The email or password you entered is incorrect.",
            Self::DuplicateAccount => {
                "An account with this email already exists. Try signing in instead."
            }
            Self::Timeout => {
                "The request timed out. Check your internet connection and try again in a moment."
            }
            Self::Network => {
                "We couldn't reach the server. Make sure you're connected to Wi-Fi or mobile data, then try again."
            }
            Self::Server => "Something went wrong on our side. Please try again later.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

/// Error returned by `AuthenticationPort` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {detail}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    /// Diagnostic detail for logs. Never shown to the user.
    pub detail: String,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }
}

/// Account returned by a successful register or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

/// Successful authentication: the user plus the access token to keep in the
/// secure credential store.
#[derive(Debug)]
pub struct AuthSession {
    pub user: AuthenticatedUser,
    pub access_token: SecretString,
}

/// Which sessions a logout revokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutScope {
    /// This device only.
    #[default]
    Local,
    /// Every device signed in to the account.
    Global,
}
