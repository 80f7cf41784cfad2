//! HealthPath Application Orchestration Layer
//!
//! This crate contains the onboarding flow controller and the use cases it
//! drives (draft persistence, debounced validation, account creation,
//! completion), plus sign-in/sign-out and app-level routing.

pub mod deps;
pub mod usecases;

pub use deps::OnboardingDeps;
pub use usecases::flow::{AppFlow, AppRoute};
pub use usecases::onboarding::{OnboardingError, OnboardingFlowController, OnboardingViewState};

#[cfg(test)]
pub(crate) mod test_support;
