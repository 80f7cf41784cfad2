//! Onboarding profile draft.
//!
//! The draft is the partially entered profile collected across onboarding
//! steps. It may hold invalid values at any time; validity is evaluated from
//! the current values whenever it is needed and never cached on the draft.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::goals::HealthGoal;

/// Biological sex as captured in the profile step.
///
/// 生理性别。`NotSet` 表示用户尚未选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiologicalSex {
    Male,
    Female,
    Other,
    #[default]
    NotSet,
}

/// Profile fields entered during onboarding.
///
/// `password` and `confirm_password` are skipped by serde: they are persisted
/// separately through the secure credential store, never alongside the
/// profile.
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub biological_sex: BiologicalSex,
    /// Centimeters.
    pub height_cm: Option<f64>,
    /// Kilograms.
    pub weight_kg: Option<f64>,
    pub selected_goals: BTreeSet<HealthGoal>,
    pub phone_number: String,
    pub biometric_unlock_enabled: bool,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
    pub has_completed_onboarding: bool,
}

impl OnboardingProfileDraft {
    /// Full name as sent to the backend.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Adds the goal if absent, removes it otherwise. Returns whether the goal
    /// is selected afterwards.
    pub fn toggle_goal(&mut self, goal: HealthGoal) -> bool {
        if self.selected_goals.remove(&goal) {
            false
        } else {
            self.selected_goals.insert(goal);
            true
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.password.is_empty() || !self.confirm_password.is_empty()
    }

    /// A draft left untouched since construction.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Debug for OnboardingProfileDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnboardingProfileDraft")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("date_of_birth", &self.date_of_birth)
            .field("biological_sex", &self.biological_sex)
            .field("height_cm", &self.height_cm)
            .field("weight_kg", &self.weight_kg)
            .field("selected_goals", &self.selected_goals)
            .field("phone_number", &self.phone_number)
            .field("biometric_unlock_enabled", &self.biometric_unlock_enabled)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .field("has_completed_onboarding", &self.has_completed_onboarding)
            .finish()
    }
}
