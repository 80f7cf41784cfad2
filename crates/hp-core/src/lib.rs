//! # hp-core
//!
//! Core domain models and business rules for HealthPath onboarding.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod app_dirs;
pub mod auth;
pub mod config;
pub mod onboarding;
pub mod ports;
pub mod security;
pub mod upload;

// Re-export commonly used types at the crate root
pub use auth::{AuthError, AuthErrorKind, AuthSession, AuthenticatedUser, LogoutScope};
pub use config::AppConfig;
pub use onboarding::{
    BiologicalSex, FieldInput, FieldKind, FieldValidationState, HealthDataAccessStatus,
    HealthGoal, OnboardingProfileDraft, OnboardingStatus, OnboardingStep, StepSequencer,
};
pub use security::SecretString;
pub use upload::{HistoryItem, UploadRecord, UploadStatus};
