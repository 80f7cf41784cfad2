//! Log-only onboarding event port
//! 仅记录日志的引导事件端口

use async_trait::async_trait;
use hp_core::onboarding::{FieldKind, FieldValidationState, OnboardingStep};
use hp_core::ports::OnboardingEventPort;
use tracing::{debug, info};

/// Writes onboarding events to the log instead of a UI.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingOnboardingEventPort;

#[async_trait]
impl OnboardingEventPort for LoggingOnboardingEventPort {
    async fn emit_step_changed(&self, step: OnboardingStep) {
        info!(?step, progress = step.progress(), "onboarding step changed");
    }

    async fn emit_field_validated(&self, field: FieldKind, state: FieldValidationState) {
        debug!(?field, valid = state.is_valid(), message = ?state.message(), "field validated");
    }
}
