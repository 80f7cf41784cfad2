//! Registration payload.
//!
//! Maps the local profile draft onto the shape the authentication service
//! expects. Both enum mappings here are lossy.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::draft::{BiologicalSex, OnboardingProfileDraft};
use super::goals::BackendHealthGoal;
use crate::security::SecretString;

/// Gender values accepted by the registration API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendGender {
    Male,
    Female,
    Other,
}

impl From<BiologicalSex> for BackendGender {
    fn from(sex: BiologicalSex) -> Self {
        match sex {
            BiologicalSex::Male => BackendGender::Male,
            BiologicalSex::Female => BackendGender::Female,
            // NotSet never passes the profile step; fold it into Other.
            BiologicalSex::Other | BiologicalSex::NotSet => BackendGender::Other,
        }
    }
}

/// Profile object embedded in the registration request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendProfile {
    pub date_of_birth: Option<NaiveDate>,
    pub gender: BackendGender,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub phone_number: Option<String>,
    pub health_goals: Vec<BackendHealthGoal>,
}

impl BackendProfile {
    pub fn from_draft(draft: &OnboardingProfileDraft) -> Self {
        let health_goals: BTreeSet<BackendHealthGoal> =
            draft.selected_goals.iter().map(|g| g.to_backend()).collect();
        let phone = draft.phone_number.trim();

        Self {
            date_of_birth: draft.date_of_birth,
            gender: draft.biological_sex.into(),
            height_cm: draft.height_cm,
            weight_kg: draft.weight_kg,
            phone_number: (!phone.is_empty()).then(|| phone.to_string()),
            health_goals: health_goals.into_iter().collect(),
        }
    }
}

/// Request passed to `AuthenticationPort::register`.
#[derive(Debug)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: SecretString,
    pub name: String,
    pub profile: BackendProfile,
}

impl RegistrationRequest {
    pub fn from_draft(draft: &OnboardingProfileDraft) -> Self {
        Self {
            email: draft.email.trim().to_string(),
            password: SecretString::new(draft.password.clone()),
            name: draft.full_name(),
            profile: BackendProfile::from_draft(draft),
        }
    }
}
