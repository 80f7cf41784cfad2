use std::sync::Arc;

use hp_core::onboarding::OnboardingStatus;
use hp_core::ports::{get_json, set_json, KeyValueStorePort};

pub const ONBOARDING_COMPLETED_KEY: &str = "onboarding.completed";

/// Persistent onboarding completion flag.
///
/// 引导完成标记的持久化读写。
#[derive(Clone)]
pub struct OnboardingStatusStore {
    store: Arc<dyn KeyValueStorePort>,
}

impl OnboardingStatusStore {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }

    /// Missing or blank values read as "not completed".
    pub async fn get(&self) -> anyhow::Result<OnboardingStatus> {
        Ok(get_json(self.store.as_ref(), ONBOARDING_COMPLETED_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn mark_completed(&self) -> anyhow::Result<()> {
        let status = OnboardingStatus {
            has_completed: true,
        };
        set_json(self.store.as_ref(), ONBOARDING_COMPLETED_KEY, &status).await
    }

    pub async fn clear(&self) -> anyhow::Result<()> {
        self.store.remove(ONBOARDING_COMPLETED_KEY).await
    }
}
