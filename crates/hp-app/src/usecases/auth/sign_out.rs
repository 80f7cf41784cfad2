use std::sync::Arc;

use tracing::{info, warn};

use hp_core::auth::LogoutScope;
use hp_core::ports::{AuthenticationPort, FlowManagerPort, SecureStorageError, SecureStoragePort};

use super::ACCESS_TOKEN_KEY;

#[derive(Debug, thiserror::Error)]
pub enum SignOutError {
    #[error("failed to delete access token: {0}")]
    TokenStorage(#[from] SecureStorageError),
}

/// Use case for signing out.
///
/// The local token is deleted even when the remote logout fails; local state
/// always ends signed out.
pub struct SignOut {
    auth: Arc<dyn AuthenticationPort>,
    secure_storage: Arc<dyn SecureStoragePort>,
    flow_manager: Arc<dyn FlowManagerPort>,
}

impl SignOut {
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

    /// Returns whether the remote session was revoked.
    pub async fn execute(&self, scope: LogoutScope) -> Result<bool, SignOutError> {
        let remote_revoked = match self.auth.logout(scope).await {
            Ok(()) => true,
            Err(err) => {
                warn!(kind = ?err.kind, detail = %err.detail, ?scope, "remote logout failed, clearing local session anyway");
                false
            }
        };

        self.secure_storage.delete(ACCESS_TOKEN_KEY)?;

        if let Err(err) = self.flow_manager.start_authentication().await {
            warn!(error = %err, "failed to route after sign-out");
        }
        info!(?scope, remote_revoked, "signed out");
        Ok(remote_revoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use hp_core::auth::{AuthError, AuthErrorKind};

    use crate::test_support::{InMemorySecureStorage, RecordingFlowManager, ScriptedAuth};

    async fn run(auth: ScriptedAuth) -> (bool, Arc<InMemorySecureStorage>, Arc<RecordingFlowManager>) {
        let secure = Arc::new(InMemorySecureStorage::default());
        secure.set(ACCESS_TOKEN_KEY, b"token-abc").unwrap();
        let flow = Arc::new(RecordingFlowManager::default());
        let revoked = SignOut::new(Arc::new(auth), secure.clone(), flow.clone())
            .execute(LogoutScope::Global)
            .await
            .unwrap();
        (revoked, secure, flow)
    }

    #[tokio::test]
    async fn sign_out_deletes_token_and_routes_to_login() {
        let (revoked, secure, flow) = run(ScriptedAuth::succeeding()).await;

        assert!(revoked);
        assert!(secure.value(ACCESS_TOKEN_KEY).is_none());
        assert_eq!(flow.auth_started.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn remote_failure_still_clears_local_session() {
        let (revoked, secure, flow) = run(ScriptedAuth::failing(AuthError::new(
            AuthErrorKind::Network,
            "connection reset",
        )))
        .await;

        assert!(!revoked);
        assert!(secure.value(ACCESS_TOKEN_KEY).is_none());
        assert_eq!(flow.auth_started.load(Ordering::SeqCst), 1);
    }
}
