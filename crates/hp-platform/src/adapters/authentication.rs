//! Placeholder authentication port implementation
//! 占位符认证端口实现

use async_trait::async_trait;
use hp_core::auth::{AuthError, AuthErrorKind, AuthSession, LogoutScope};
use hp_core::onboarding::RegistrationRequest;
use hp_core::ports::AuthenticationPort;
use hp_core::security::SecretString;

/// Answers every call with a network error until a real backend is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderAuthenticationPort;

fn not_configured(operation: &str) -> AuthError {
    AuthError::new(
        AuthErrorKind::Network,
        format!("AuthenticationPort::{operation} has no backend configured"),
    )
}

#[async_trait]
impl AuthenticationPort for PlaceholderAuthenticationPort {
    async fn register(&self, _request: &RegistrationRequest) -> Result<AuthSession, AuthError> {
        Err(not_configured("register"))
    }

    async fn login(
        &self,
        _email: &str,
        _password: &SecretString,
    ) -> Result<AuthSession, AuthError> {
        Err(not_configured("login"))
    }

    async fn logout(&self, _scope: LogoutScope) -> Result<(), AuthError> {
        // Nothing remote to revoke.
        Ok(())
    }
}
