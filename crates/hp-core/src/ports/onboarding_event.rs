use async_trait::async_trait;

use crate::onboarding::{FieldKind, FieldValidationState, OnboardingStep};

/// Outbound notifications for the presentation layer.
#[async_trait]
pub trait OnboardingEventPort: Send + Sync {
    async fn emit_step_changed(&self, step: OnboardingStep);

    async fn emit_field_validated(&self, field: FieldKind, state: FieldValidationState);
}
