pub mod auth;
pub mod flow;
pub mod health_access;
pub mod onboarding;

pub use auth::{SignIn, SignInError, SignOut, SignOutError};
pub use flow::{AppFlow, AppRoute};
pub use health_access::RequestHealthDataAccess;
pub use onboarding::{
    AccountCreationError, AccountCreationOrchestrator, CompleteOnboarding,
    DebouncedValidationScheduler, OnboardingFlowController, OnboardingStatusStore,
    ProfileDraftStore, ResetOnboarding,
};
