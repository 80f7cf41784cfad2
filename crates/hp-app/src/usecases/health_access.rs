use std::sync::Arc;

use tracing::{info, warn};

use hp_core::onboarding::HealthDataAccessStatus;
use hp_core::ports::HealthDataPermissionPort;

/// Use case for asking the platform for health-data access.
///
/// Never fails: a platform error is recorded as `Unavailable` so the
/// onboarding step can always be left.
pub struct RequestHealthDataAccess {
    health_data: Arc<dyn HealthDataPermissionPort>,
}

impl RequestHealthDataAccess {
    pub fn new(health_data: Arc<dyn HealthDataPermissionPort>) -> Self {
        Self { health_data }
    }

    pub async fn execute(&self) -> HealthDataAccessStatus {
        let status = match self.health_data.request_authorization().await {
            Ok(true) => HealthDataAccessStatus::Authorized,
            Ok(false) => HealthDataAccessStatus::Denied,
            Err(err) => {
                warn!(error = %err, "health data authorization request failed");
                HealthDataAccessStatus::Unavailable
            }
        };
        info!(?status, "health data access resolved");
        status
    }
}
