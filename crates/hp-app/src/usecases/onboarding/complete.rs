use std::sync::Arc;

use tracing::info;

use hp_core::ports::FlowManagerPort;

use super::draft_store::ProfileDraftStore;
use super::status::OnboardingStatusStore;

/// Use case for completing onboarding.
///
/// Marks onboarding as complete in persistent state, then hands control to
/// the flow manager.
pub struct CompleteOnboarding {
    status: OnboardingStatusStore,
    flow_manager: Arc<dyn FlowManagerPort>,
}

impl CompleteOnboarding {
    pub fn new(status: OnboardingStatusStore, flow_manager: Arc<dyn FlowManagerPort>) -> Self {
        Self {
            status,
            flow_manager,
        }
    }

    /// Mark onboarding as complete. Safe to call more than once.
    ///
    /// The flow manager is notified even when the flag cannot be written;
    /// the flag error is returned afterwards.
    pub async fn execute(&self) -> anyhow::Result<()> {
        let flagged = self.status.mark_completed().await;
        self.flow_manager.complete_onboarding().await?;
        flagged?;
        info!("Onboarding completed");
        Ok(())
    }
}

/// Use case for starting onboarding over.
///
/// Removes the completion flag and any persisted draft.
pub struct ResetOnboarding {
    status: OnboardingStatusStore,
    drafts: ProfileDraftStore,
}

impl ResetOnboarding {
    pub fn new(status: OnboardingStatusStore, drafts: ProfileDraftStore) -> Self {
        Self { status, drafts }
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        self.status.clear().await?;
        self.drafts.clear().await?;
        info!("Onboarding reset");
        Ok(())
    }
}
