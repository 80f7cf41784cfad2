//! Remote authentication service port.
//!
//! Failures carry a structured [`AuthErrorKind`](crate::auth::AuthErrorKind);
//! adapters classify transport errors (timeouts, unreachable host) before
//! they cross this boundary.

use async_trait::async_trait;

use crate::auth::{AuthError, AuthSession, LogoutScope};
use crate::onboarding::RegistrationRequest;
use crate::security::SecretString;

#[async_trait]
pub trait AuthenticationPort: Send + Sync {
    /// Create an account and sign it in.
    async fn register(&self, request: &RegistrationRequest) -> Result<AuthSession, AuthError>;

    /// Sign in to an existing account.
    async fn login(&self, email: &str, password: &SecretString) -> Result<AuthSession, AuthError>;

    /// Revoke the current session.
    async fn logout(&self, scope: LogoutScope) -> Result<(), AuthError>;
}
