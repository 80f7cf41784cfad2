//! Health goals.
//!
//! The app offers a richer set of goal tags than the backend understands.
//! [`HealthGoal::to_backend`] collapses them onto the coarser
//! [`BackendHealthGoal`] enum; several tags intentionally share one value.

use serde::{Deserialize, Serialize};

/// Goal tags the user can pick during onboarding.
///
/// 用户在引导流程中可选择的健康目标。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthGoal {
    LoseWeight,
    GainWeight,
    BuildMuscle,
    ImproveEndurance,
    EatHealthier,
    SleepBetter,
    ReduceStress,
    ManageChronicCondition,
    TrackLabResults,
    MonitorHeartHealth,
    GeneralWellness,
}

impl HealthGoal {
    pub const ALL: [HealthGoal; 11] = [
        HealthGoal::LoseWeight,
        HealthGoal::GainWeight,
        HealthGoal::BuildMuscle,
        HealthGoal::ImproveEndurance,
        HealthGoal::EatHealthier,
        HealthGoal::SleepBetter,
        HealthGoal::ReduceStress,
        HealthGoal::ManageChronicCondition,
        HealthGoal::TrackLabResults,
        HealthGoal::MonitorHeartHealth,
        HealthGoal::GeneralWellness,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            HealthGoal::LoseWeight => "Lose weight",
            HealthGoal::GainWeight => "Gain weight",
            HealthGoal::BuildMuscle => "Build muscle",
            HealthGoal::ImproveEndurance => "Improve endurance",
            HealthGoal::EatHealthier => "Eat healthier",
            HealthGoal::SleepBetter => "Sleep better",
            HealthGoal::ReduceStress => "Reduce stress",
            HealthGoal::ManageChronicCondition => "Manage a chronic condition",
            HealthGoal::TrackLabResults => "Track lab results",
            HealthGoal::MonitorHeartHealth => "Monitor heart health",
            HealthGoal::GeneralWellness => "General wellness",
        }
    }

    /// Many-to-one mapping onto the backend goal enum, grouped by care
    /// program.
    pub fn to_backend(&self) -> BackendHealthGoal {
        match self {
            HealthGoal::LoseWeight | HealthGoal::GainWeight => BackendHealthGoal::WeightManagement,
            HealthGoal::BuildMuscle | HealthGoal::ImproveEndurance => BackendHealthGoal::Fitness,
            HealthGoal::EatHealthier => BackendHealthGoal::Nutrition,
            HealthGoal::SleepBetter | HealthGoal::ReduceStress => BackendHealthGoal::MentalWellbeing,
            HealthGoal::ManageChronicCondition
            | HealthGoal::TrackLabResults
            | HealthGoal::MonitorHeartHealth => BackendHealthGoal::ChronicCareManagement,
            HealthGoal::GeneralWellness => BackendHealthGoal::GeneralHealth,
        }
    }
}

/// Goal values accepted by the registration API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendHealthGoal {
    WeightManagement,
    Fitness,
    Nutrition,
    MentalWellbeing,
    ChronicCareManagement,
    GeneralHealth,
}
