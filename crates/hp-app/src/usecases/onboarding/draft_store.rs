//! Onboarding draft persistence.
//!
//! The draft is split on save: profile fields and the current step go to the
//! key-value store as JSON, while the password pair goes to the secure
//! credential store. `load` joins the two halves again.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use hp_core::onboarding::{OnboardingProfileDraft, OnboardingStep};
use hp_core::ports::{get_json, set_json, KeyValueStorePort, SecureStorageError, SecureStoragePort};

pub const PROFILE_DRAFT_KEY: &str = "onboarding.profile_draft";
pub const DRAFT_CREDENTIALS_KEY: &str = "onboarding.draft_credentials";

#[derive(Debug, thiserror::Error)]
pub enum DraftStoreError {
    #[error("draft storage failed: {0}")]
    Storage(#[source] anyhow::Error),
    #[error("draft credential storage failed: {0}")]
    Credentials(#[from] SecureStorageError),
    #[error("stored draft credentials are corrupt: {0}")]
    CorruptCredentials(#[source] serde_json::Error),
}

/// A persisted draft and the step the user was on.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedDraft {
    pub step: OnboardingStep,
    pub draft: OnboardingProfileDraft,
}

#[derive(Serialize, Deserialize)]
struct PersistedProfile {
    step: OnboardingStep,
    draft: OnboardingProfileDraft,
}

#[derive(Serialize, Deserialize)]
struct DraftCredentials {
    password: String,
    confirm_password: String,
}

#[derive(Clone)]
pub struct ProfileDraftStore {
    store: Arc<dyn KeyValueStorePort>,
    secure_storage: Arc<dyn SecureStoragePort>,
}

impl ProfileDraftStore {
    pub fn new(
        store: Arc<dyn KeyValueStorePort>,
        secure_storage: Arc<dyn SecureStoragePort>,
    ) -> Self {
        Self {
            store,
            secure_storage,
        }
    }

    pub async fn load(&self) -> Result<Option<SavedDraft>, DraftStoreError> {
        let Some(persisted) = get_json::<PersistedProfile>(self.store.as_ref(), PROFILE_DRAFT_KEY)
            .await
            .map_err(DraftStoreError::Storage)?
        else {
            return Ok(None);
        };

        let mut draft = persisted.draft;
        if let Some(bytes) = self.secure_storage.get(DRAFT_CREDENTIALS_KEY)? {
            let credentials: DraftCredentials =
                serde_json::from_slice(&bytes).map_err(DraftStoreError::CorruptCredentials)?;
            draft.password = credentials.password;
            draft.confirm_password = credentials.confirm_password;
        }

        // A draft is never saved at Completion; treat one as a fresh start.
        let step = if persisted.step.is_terminal() {
            warn!("Persisted draft points at the terminal step, resuming at the first step");
            OnboardingStep::FIRST
        } else {
            persisted.step
        };

        debug!(?step, "Loaded onboarding draft");
        Ok(Some(SavedDraft { step, draft }))
    }

    pub async fn save(
        &self,
        step: OnboardingStep,
        draft: &OnboardingProfileDraft,
    ) -> Result<(), DraftStoreError> {
        let persisted = PersistedProfile {
            step,
            draft: draft.clone(),
        };
        set_json(self.store.as_ref(), PROFILE_DRAFT_KEY, &persisted)
            .await
            .map_err(DraftStoreError::Storage)?;

        if draft.has_credentials() {
            let credentials = DraftCredentials {
                password: draft.password.clone(),
                confirm_password: draft.confirm_password.clone(),
            };
            let bytes =
                serde_json::to_vec(&credentials).map_err(DraftStoreError::CorruptCredentials)?;
            self.secure_storage.set(DRAFT_CREDENTIALS_KEY, &bytes)?;
        } else {
            self.secure_storage.delete(DRAFT_CREDENTIALS_KEY)?;
        }
        Ok(())
    }

    /// Remove both halves. Removing an absent draft succeeds.
    pub async fn clear(&self) -> Result<(), DraftStoreError> {
        self.store
            .remove(PROFILE_DRAFT_KEY)
            .await
            .map_err(DraftStoreError::Storage)?;
        self.secure_storage.delete(DRAFT_CREDENTIALS_KEY)?;
        Ok(())
    }
}
