//! Account creation.
//!
//! Checks the draft locally, sends one registration request, and on success
//! stores the access token and the completion flag. A second call while one
//! is in flight is rejected without touching the network. Once the backend
//! has accepted the registration, local storage failures are logged and the
//! attempt still counts as a success.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, info_span, warn, Instrument};

use hp_core::auth::{AuthError, AuthenticatedUser};
use hp_core::onboarding::{
    first_incomplete_step, validate_confirm_password, validate_email,
    validate_registration_password, FieldKind, FieldValidationState, OnboardingProfileDraft,
    OnboardingStep, RegistrationRequest,
};
use hp_core::ports::{AuthenticationPort, ClockPort, SecureStoragePort};

use super::status::OnboardingStatusStore;
use crate::usecases::auth::ACCESS_TOKEN_KEY;

/// Errors produced by account creation.
#[derive(Debug, thiserror::Error)]
pub enum AccountCreationError {
    #[error("profile incomplete at step {step:?}")]
    IncompleteProfile { step: OnboardingStep },
    #[error("invalid {field:?}: {reason}")]
    InvalidField { field: FieldKind, reason: String },
    #[error("account creation already in progress")]
    AlreadyInProgress,
    #[error("registration failed: {0}")]
    Registration(#[from] AuthError),
}

impl AccountCreationError {
    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::IncompleteProfile { .. } => {
                "Some profile details are missing. Go back and complete them.".to_string()
            }
            Self::InvalidField { reason, .. } => reason.clone(),
            Self::AlreadyInProgress => "Your account is already being created.".to_string(),
            Self::Registration(err) => err.user_message().to_string(),
        }
    }
}

/// Clears the in-flight flag when dropped, including when the owning future
/// is cancelled.
pub(crate) struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub struct AccountCreationOrchestrator {
    auth: Arc<dyn AuthenticationPort>,
    secure_storage: Arc<dyn SecureStoragePort>,
    status: OnboardingStatusStore,
    clock: Arc<dyn ClockPort>,
    in_flight: AtomicBool,
}

impl AccountCreationOrchestrator {
    pub fn new(
        auth: Arc<dyn AuthenticationPort>,
        secure_storage: Arc<dyn SecureStoragePort>,
        status: OnboardingStatusStore,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            auth,
            secure_storage,
            status,
            clock,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn execute(
        &self,
        draft: &OnboardingProfileDraft,
    ) -> Result<AuthenticatedUser, AccountCreationError> {
        let _guard =
            InFlightGuard::acquire(&self.in_flight).ok_or(AccountCreationError::AlreadyInProgress)?;

        self.check_preconditions(draft)?;
        let request = RegistrationRequest::from_draft(draft);

        let span = info_span!(
            "usecase.onboarding.create_account",
            goals = request.profile.health_goals.len()
        );
        async {
            let session = self.auth.register(&request).await.map_err(|err| {
                warn!(kind = ?err.kind, detail = %err.detail, "registration rejected");
                err
            })?;

            // The account exists on the backend from here on.
            if let Err(err) = self
                .secure_storage
                .set(ACCESS_TOKEN_KEY, session.access_token.expose_bytes())
            {
                error!(error = %err, "failed to store access token after registration");
            }
            if let Err(err) = self.status.mark_completed().await {
                error!(error = %err, "failed to persist onboarding status after registration");
            }

            info!(user_id = %session.user.id, "account created");
            Ok(session.user)
        }
        .instrument(span)
        .await
    }

    fn check_preconditions(
        &self,
        draft: &OnboardingProfileDraft,
    ) -> Result<(), AccountCreationError> {
        match first_incomplete_step(draft, self.clock.today()) {
            None => Ok(()),
            Some(OnboardingStep::AccountCreation) => Err(first_invalid_account_field(draft)),
            Some(step) => Err(AccountCreationError::IncompleteProfile { step }),
        }
    }
}

fn first_invalid_account_field(draft: &OnboardingProfileDraft) -> AccountCreationError {
    let checks = [
        (FieldKind::Email, validate_email(&draft.email)),
        (
            FieldKind::Password,
            validate_registration_password(&draft.password),
        ),
        (
            FieldKind::ConfirmPassword,
            validate_confirm_password(&draft.password, &draft.confirm_password),
        ),
    ];
    checks
        .into_iter()
        .find_map(|(field, state)| match state {
            FieldValidationState::Invalid(reason) => {
                Some(AccountCreationError::InvalidField { field, reason })
            }
            FieldValidationState::Valid => None,
        })
        .unwrap_or(AccountCreationError::IncompleteProfile {
            step: OnboardingStep::AccountCreation,
        })
}
