use tokio::sync::{Mutex, MutexGuard};

use hp_core::onboarding::{HealthDataAccessStatus, OnboardingProfileDraft, OnboardingStep};

/// Mutable onboarding session owned by the flow controller.
#[derive(Debug, Clone, Default)]
pub struct OnboardingSession {
    pub step: OnboardingStep,
    pub draft: OnboardingProfileDraft,
    pub error_message: Option<String>,
    pub show_error: bool,
    pub health_access: HealthDataAccessStatus,
}

impl OnboardingSession {
    pub fn resume(step: OnboardingStep, draft: OnboardingProfileDraft) -> Self {
        Self {
            step,
            draft,
            ..Default::default()
        }
    }

    /// Session for a user who already finished onboarding.
    pub fn completed() -> Self {
        Self {
            step: OnboardingStep::Completion,
            draft: OnboardingProfileDraft {
                has_completed_onboarding: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn is_completed(&self) -> bool {
        self.draft.has_completed_onboarding || self.step.is_terminal()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
        self.show_error = false;
    }
}

/// Shared onboarding context containing the session and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `session`.
/// - `dispatch_lock`: held for a whole step transition, including its side
///   effects and event emission.
/// - `session`: held for reads and short writes. Never held while emitting
///   events, so event handlers may read the session.
pub struct OnboardingContext {
    session: Mutex<OnboardingSession>,
    dispatch_lock: Mutex<()>,
}

impl OnboardingContext {
    pub fn new(initial: OnboardingSession) -> Self {
        Self {
            session: Mutex::new(initial),
            dispatch_lock: Mutex::new(()),
        }
    }

    pub async fn snapshot(&self) -> OnboardingSession {
        self.session.lock().await.clone()
    }

    pub async fn session(&self) -> MutexGuard<'_, OnboardingSession> {
        self.session.lock().await
    }

    pub async fn acquire_dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }
}
