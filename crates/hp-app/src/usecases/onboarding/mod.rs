//! Onboarding use cases
//!
//! The flow controller owns the profile draft and drives the step sequencer.
//! The remaining modules are the pieces it is built from: draft and status
//! persistence, debounced field validation, account creation, and the
//! completion gate.

pub mod complete;
pub mod context;
pub mod controller;
pub mod create_account;
pub mod debounce;
pub mod draft_store;
pub mod status;

pub use complete::{CompleteOnboarding, ResetOnboarding};
pub use context::{OnboardingContext, OnboardingSession};
pub use controller::{OnboardingError, OnboardingFlowController, OnboardingViewState};
pub use create_account::{AccountCreationError, AccountCreationOrchestrator};
pub use debounce::DebouncedValidationScheduler;
pub use draft_store::{
    DraftStoreError, ProfileDraftStore, SavedDraft, DRAFT_CREDENTIALS_KEY, PROFILE_DRAFT_KEY,
};
pub use status::{OnboardingStatusStore, ONBOARDING_COMPLETED_KEY};
