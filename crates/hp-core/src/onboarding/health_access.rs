use serde::{Deserialize, Serialize};

/// Outcome of asking the platform for health-data access.
///
/// Recorded for display only; none of these values block onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthDataAccessStatus {
    #[default]
    NotDetermined,
    Authorized,
    Denied,
    /// The platform reported an error or has no health store.
    Unavailable,
}

impl HealthDataAccessStatus {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }
}
