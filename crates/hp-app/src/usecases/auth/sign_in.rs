use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use hp_core::auth::{AuthError, AuthenticatedUser};
use hp_core::onboarding::{validate_email, validate_login_password, FieldKind, FieldValidationState};
use hp_core::ports::{AuthenticationPort, FlowManagerPort, SecureStorageError, SecureStoragePort};
use hp_core::security::SecretString;

use super::ACCESS_TOKEN_KEY;

#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    #[error("invalid {field:?}: {reason}")]
    InvalidField { field: FieldKind, reason: String },
    #[error("login failed: {0}")]
    Auth(#[from] AuthError),
    #[error("failed to store access token: {0}")]
    TokenStorage(#[from] SecureStorageError),
}

impl SignInError {
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidField { reason, .. } => reason.clone(),
            Self::Auth(err) => err.user_message().to_string(),
            Self::TokenStorage(_) => {
                "Signed in, but your session could not be saved on this device.".to_string()
            }
        }
    }
}

/// Use case for signing in to an existing account.
///
/// Login only checks email format and that a password was entered; the
/// registration strength rules do not apply here.
pub struct SignIn {
    auth: Arc<dyn AuthenticationPort>,
    secure_storage: Arc<dyn SecureStoragePort>,
    flow_manager: Arc<dyn FlowManagerPort>,
}

impl SignIn {
    pub fn new(
        auth: Arc<dyn AuthenticationPort>,
        secure_storage: Arc<dyn SecureStoragePort>,
        flow_manager: Arc<dyn FlowManagerPort>,
    ) -> Self {
        Self {
            auth,
            secure_storage,
            flow_manager,
        }
    }

    pub async fn execute(
        &self,
        email: &str,
        password: SecretString,
    ) -> Result<AuthenticatedUser, SignInError> {
        let email = email.trim();
        for (field, state) in [
            (FieldKind::Email, validate_email(email)),
            (FieldKind::Password, validate_login_password(&password)),
        ] {
            if let FieldValidationState::Invalid(reason) = state {
                return Err(SignInError::InvalidField { field, reason });
            }
        }

        async {
            let session = self.auth.login(email, &password).await.map_err(|err| {
                warn!(kind = ?err.kind, detail = %err.detail, "login rejected");
                err
            })?;
            self.secure_storage
                .set(ACCESS_TOKEN_KEY, session.access_token.expose_bytes())?;

            if let Err(err) = self.flow_manager.set_last_known_email(email).await {
                warn!(error = %err, "failed to remember last signed-in email");
            }
            if let Err(err) = self.flow_manager.finish_authentication().await {
                warn!(error = %err, "failed to route after sign-in");
            }

            info!(user_id = %session.user.id, "signed in");
            Ok(session.user)
        }
        .instrument(info_span!("usecase.auth.sign_in"))
        .await
    }
}
