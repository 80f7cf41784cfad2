//! Onboarding flow controller.
//!
//! Single owner of the onboarding draft. The presentation layer reads
//! [`OnboardingViewState`] snapshots and proposes edits through the setter
//! methods; every edit is persisted and, for text fields, re-validated after
//! the debounce delay. Step changes go through [`StepSequencer`] and are
//! announced on the [`OnboardingEventPort`].

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, error, info, info_span, warn, Instrument};

use hp_core::auth::AuthenticatedUser;
use hp_core::onboarding::{
    can_continue, BiologicalSex, FieldInput, FieldKind, FieldValidationState,
    HealthDataAccessStatus, HealthGoal, OnboardingProfileDraft, OnboardingStep, SequencerEvent,
    StepAction, StepSequencer,
};
use hp_core::ports::{ClockPort, OnboardingEventPort};

use super::complete::{CompleteOnboarding, ResetOnboarding};
use super::context::{OnboardingContext, OnboardingSession};
use super::create_account::{AccountCreationError, AccountCreationOrchestrator, InFlightGuard};
use super::debounce::DebouncedValidationScheduler;
use super::draft_store::ProfileDraftStore;
use super::status::OnboardingStatusStore;
use crate::deps::OnboardingDeps;
use crate::usecases::health_access::RequestHealthDataAccess;

/// Errors produced by the onboarding flow controller.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("onboarding already completed")]
    AlreadyCompleted,
    #[error("account creation in progress")]
    SubmissionInProgress,
    #[error("failed to read onboarding status: {0}")]
    Status(#[source] anyhow::Error),
    #[error("failed to reset onboarding: {0}")]
    Reset(#[source] anyhow::Error),
}

/// Read-only snapshot for rendering the current onboarding screen.
///
/// `draft` never exposes passwords through `Debug` or serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnboardingViewState {
    pub step: OnboardingStep,
    pub progress: f64,
    pub draft: OnboardingProfileDraft,
    pub can_continue: bool,
    pub is_submitting: bool,
    pub error_message: Option<String>,
    pub show_error: bool,
    pub health_access: HealthDataAccessStatus,
    pub validation: BTreeMap<FieldKind, FieldValidationState>,
}

pub struct OnboardingFlowController {
    context: OnboardingContext,
    drafts: ProfileDraftStore,
    create_account: AccountCreationOrchestrator,
    complete: CompleteOnboarding,
    reset: ResetOnboarding,
    health_access: RequestHealthDataAccess,
    validation: DebouncedValidationScheduler,
    events: Arc<dyn OnboardingEventPort>,
    clock: Arc<dyn ClockPort>,
    /// Set for the whole of `create_account`, cleared by `InFlightGuard`.
    submitting: AtomicBool,
}

impl OnboardingFlowController {
    /// Build the controller, reading the completion flag and any saved draft.
    pub async fn load(deps: OnboardingDeps) -> Result<Self, OnboardingError> {
        let status = OnboardingStatusStore::new(Arc::clone(&deps.key_value));
        let drafts =
            ProfileDraftStore::new(Arc::clone(&deps.key_value), Arc::clone(&deps.secure_storage));

        let has_completed = status
            .get()
            .await
            .map_err(OnboardingError::Status)?
            .has_completed;

        let session = if has_completed {
            OnboardingSession::completed()
        } else {
            match drafts.load().await {
                Ok(Some(saved)) => OnboardingSession::resume(saved.step, saved.draft),
                Ok(None) => OnboardingSession::default(),
                Err(err) => {
                    warn!(error = %err, "discarding unreadable onboarding draft");
                    OnboardingSession::default()
                }
            }
        };
        info!(step = ?session.step, has_completed, "onboarding controller loaded");

        Ok(Self {
            context: OnboardingContext::new(session),
            create_account: AccountCreationOrchestrator::new(
                Arc::clone(&deps.auth),
                Arc::clone(&deps.secure_storage),
                status.clone(),
                Arc::clone(&deps.clock),
            ),
            complete: CompleteOnboarding::new(status.clone(), Arc::clone(&deps.flow_manager)),
            reset: ResetOnboarding::new(status, drafts.clone()),
            drafts,
            health_access: RequestHealthDataAccess::new(Arc::clone(&deps.health_data)),
            validation: DebouncedValidationScheduler::new(
                deps.validation_debounce,
                Arc::clone(&deps.clock),
                Arc::clone(&deps.events),
            ),
            events: deps.events,
            clock: deps.clock,
            submitting: AtomicBool::new(false),
        })
    }

    // ----- reads -----

    pub async fn view_state(&self) -> OnboardingViewState {
        let session = self.context.snapshot().await;
        OnboardingViewState {
            step: session.step,
            progress: session.step.progress(),
            can_continue: can_continue(session.step, &session.draft, self.today()),
            draft: session.draft,
            is_submitting: self.is_submitting(),
            error_message: session.error_message,
            show_error: session.show_error,
            health_access: session.health_access,
            validation: self.validation.snapshot(),
        }
    }

    pub async fn current_step(&self) -> OnboardingStep {
        self.context.session().await.step
    }

    pub async fn can_continue(&self) -> bool {
        let session = self.context.session().await;
        can_continue(session.step, &session.draft, self.today())
    }

    pub async fn progress(&self) -> f64 {
        self.context.session().await.step.progress()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    // ----- draft edits -----

    pub async fn set_first_name(&self, value: impl Into<String>) -> Result<(), OnboardingError> {
        let value = value.into();
        self.edit(move |draft| {
            draft.first_name = value;
            vec![FieldKind::FirstName]
        })
        .await
    }

    pub async fn set_last_name(&self, value: impl Into<String>) -> Result<(), OnboardingError> {
        let value = value.into();
        self.edit(move |draft| {
            draft.last_name = value;
            vec![FieldKind::LastName]
        })
        .await
    }

    pub async fn set_date_of_birth(&self, value: Option<NaiveDate>) -> Result<(), OnboardingError> {
        self.edit(move |draft| {
            draft.date_of_birth = value;
            vec![FieldKind::DateOfBirth]
        })
        .await
    }

    pub async fn set_biological_sex(&self, value: BiologicalSex) -> Result<(), OnboardingError> {
        self.edit(move |draft| {
            draft.biological_sex = value;
            Vec::new()
        })
        .await
    }

    pub async fn set_height_cm(&self, value: Option<f64>) -> Result<(), OnboardingError> {
        self.edit(move |draft| {
            draft.height_cm = value;
            Vec::new()
        })
        .await
    }

    pub async fn set_weight_kg(&self, value: Option<f64>) -> Result<(), OnboardingError> {
        self.edit(move |draft| {
            draft.weight_kg = value;
            Vec::new()
        })
        .await
    }

    /// Returns whether `goal` is selected afterwards.
    pub async fn toggle_goal(&self, goal: HealthGoal) -> Result<bool, OnboardingError> {
        let mut selected = false;
        self.edit(|draft| {
            selected = draft.toggle_goal(goal);
            Vec::new()
        })
        .await?;
        Ok(selected)
    }

    pub async fn set_phone_number(&self, value: impl Into<String>) -> Result<(), OnboardingError> {
        let value = value.into();
        self.edit(move |draft| {
            draft.phone_number = value;
            vec![FieldKind::PhoneNumber]
        })
        .await
    }

    pub async fn set_biometric_unlock(&self, enabled: bool) -> Result<(), OnboardingError> {
        self.edit(move |draft| {
            draft.biometric_unlock_enabled = enabled;
            Vec::new()
        })
        .await
    }

    pub async fn set_email(&self, value: impl Into<String>) -> Result<(), OnboardingError> {
        let value = value.into();
        self.edit(move |draft| {
            draft.email = value;
            vec![FieldKind::Email]
        })
        .await
    }

    pub async fn set_password(&self, value: impl Into<String>) -> Result<(), OnboardingError> {
        let value = value.into();
        self.edit(move |draft| {
            draft.password = value;
            // The confirmation only gets a verdict once the user has typed one.
            if draft.confirm_password.is_empty() {
                vec![FieldKind::Password]
            } else {
                vec![FieldKind::Password, FieldKind::ConfirmPassword]
            }
        })
        .await
    }

    pub async fn set_confirm_password(
        &self,
        value: impl Into<String>,
    ) -> Result<(), OnboardingError> {
        let value = value.into();
        self.edit(move |draft| {
            draft.confirm_password = value;
            vec![FieldKind::ConfirmPassword]
        })
        .await
    }

    /// Apply `change`, schedule validation for the fields it returns, persist.
    async fn edit<F>(&self, change: F) -> Result<(), OnboardingError>
    where
        F: FnOnce(&mut OnboardingProfileDraft) -> Vec<FieldKind> + Send,
    {
        let mut session = self.context.session().await;
        if session.is_completed() {
            return Err(OnboardingError::AlreadyCompleted);
        }

        let revalidate = change(&mut session.draft);
        for field in revalidate {
            self.validation
                .schedule(FieldInput::from_draft(field, &session.draft));
        }
        self.persist(&session).await;
        Ok(())
    }

    async fn persist(&self, session: &OnboardingSession) {
        if let Err(err) = self.drafts.save(session.step, &session.draft).await {
            warn!(error = %err, step = ?session.step, "failed to persist onboarding draft");
        }
    }

    // ----- navigation -----

    pub async fn next_step(&self) -> OnboardingStep {
        self.dispatch(SequencerEvent::Next).await
    }

    pub async fn previous_step(&self) -> OnboardingStep {
        self.dispatch(SequencerEvent::Previous).await
    }

    pub async fn go_to_step(&self, step: OnboardingStep) -> OnboardingStep {
        self.dispatch(SequencerEvent::GoTo(step)).await
    }

    async fn dispatch(&self, event: SequencerEvent) -> OnboardingStep {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        self.dispatch_locked(event).await
    }

    /// Caller holds the dispatch lock.
    async fn dispatch_locked(&self, event: SequencerEvent) -> OnboardingStep {
        let span = info_span!("usecase.onboarding.dispatch", event = ?event);
        async {
            let (from, to, actions) = {
                let mut session = self.context.session().await;
                let from = session.step;
                let (to, actions) = StepSequencer::transition(from, event);
                session.step = to;
                if from != to && !session.is_completed() {
                    self.persist(&session).await;
                }
                (from, to, actions)
            };
            info!(?from, ?to, "onboarding step transition");

            for action in actions {
                debug!(?action, "onboarding executing action");
                match action {
                    StepAction::MarkOnboardingComplete => self.finish().await,
                }
            }

            if from != to {
                self.events.emit_step_changed(to).await;
            }
            to
        }
        .instrument(span)
        .await
    }

    /// Completion gate: persist the flag, notify the flow manager, drop the
    /// draft. Failures are logged; the account already exists at this point.
    async fn finish(&self) {
        if let Err(err) = self.complete.execute().await {
            error!(error = %err, "failed to record onboarding completion");
        }
        self.validation.reset();
        {
            let mut session = self.context.session().await;
            session.draft = OnboardingProfileDraft {
                has_completed_onboarding: true,
                ..Default::default()
            };
            session.clear_error();
        }
        if let Err(err) = self.drafts.clear().await {
            warn!(error = %err, "failed to remove persisted onboarding draft");
        }
    }

    // ----- side-effecting steps -----

    /// Ask for health-data access. The result is recorded but never blocks
    /// progress.
    pub async fn request_health_access(&self) -> Result<HealthDataAccessStatus, OnboardingError> {
        if self.context.session().await.is_completed() {
            return Err(OnboardingError::AlreadyCompleted);
        }
        let status = self.health_access.execute().await;
        self.context.session().await.health_access = status;
        Ok(status)
    }

    /// Submit the draft for registration.
    ///
    /// Returns `Ok(None)` when the attempt failed (the reason is in
    /// `view_state().error_message`) or when a submission was already in
    /// flight. Dropping the returned future releases the submission, so a
    /// cancelled attempt can be retried.
    pub async fn create_account(&self) -> Result<Option<AuthenticatedUser>, OnboardingError> {
        let Some(_submission) = InFlightGuard::acquire(&self.submitting) else {
            debug!("duplicate account submission suppressed");
            return Ok(None);
        };

        let draft = {
            let mut session = self.context.session().await;
            if session.is_completed() {
                return Err(OnboardingError::AlreadyCompleted);
            }
            session.clear_error();
            session.draft.clone()
        };

        let result = self.create_account.execute(&draft).await;

        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        match result {
            Ok(user) => {
                // Registration may be submitted from any step.
                self.context.session().await.step = OnboardingStep::AccountCreation;
                self.dispatch_locked(SequencerEvent::RegistrationSucceeded)
                    .await;
                Ok(Some(user))
            }
            Err(AccountCreationError::AlreadyInProgress) => {
                debug!("account creation already in flight");
                Ok(None)
            }
            Err(err) => {
                warn!(error = %err, "account creation failed");
                let mut session = self.context.session().await;
                session.error_message = Some(err.user_message());
                session.show_error = true;
                Ok(None)
            }
        }
    }

    pub async fn dismiss_error(&self) {
        self.context.session().await.clear_error();
    }

    /// Start over from the first step, forgetting the completion flag and
    /// any saved draft.
    pub async fn reset(&self) -> Result<(), OnboardingError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        if self.is_submitting() {
            return Err(OnboardingError::SubmissionInProgress);
        }
        {
            let mut session = self.context.session().await;
            self.validation.reset();
            self.reset.execute().await.map_err(OnboardingError::Reset)?;
            *session = OnboardingSession::default();
        }
        info!("onboarding restarted");
        self.events.emit_step_changed(OnboardingStep::FIRST).await;
        Ok(())
    }

    fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
