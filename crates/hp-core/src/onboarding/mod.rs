//! Onboarding domain.
//!
//! This module defines the onboarding flow: the ordered step enumeration and
//! its pure transition function, the profile draft collected along the way,
//! field validators, and the lossy mapping from local profile data onto the
//! registration payload expected by the backend.

pub mod draft;
pub mod goals;
pub mod health_access;
pub mod registration;
pub mod status;
pub mod step;
pub mod validation;

pub use draft::{BiologicalSex, OnboardingProfileDraft};
pub use goals::{BackendHealthGoal, HealthGoal};
pub use health_access::HealthDataAccessStatus;
pub use registration::{BackendGender, BackendProfile, RegistrationRequest};
pub use status::OnboardingStatus;
pub use step::{
    can_continue, first_incomplete_step, OnboardingStep, SequencerEvent, StepAction,
    StepSequencer,
};
pub use validation::{
    validate_confirm_password, validate_date_of_birth, validate_email, validate_field,
    validate_login_password, validate_name, validate_phone, validate_registration_password,
    FieldInput, FieldKind, FieldValidationState,
};
