//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the core business logic to remain independent of
//! external dependencies.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port to `hp-core/ports`, ask yourself three questions:
//!
//! 1. **Does this port represent a business capability?**
//! 2. **Will it be depended upon by multiple use cases or domains?**
//! 3. **Is it implemented by the infrastructure or platform layer?**
//!
//! If all three answers are **yes**, place it in `hp-core/ports`.
//! Otherwise, place it in the relevant `domain` submodule.

pub mod app_dirs;
pub mod authentication;
mod clock;
pub mod errors;
pub mod flow_manager;
pub mod health_data;
pub mod key_value;
pub mod onboarding_event;
pub mod secure_storage;

pub use clock::*;

pub use app_dirs::AppDirsPort;
pub use authentication::AuthenticationPort;
pub use errors::AppDirsError;
pub use flow_manager::FlowManagerPort;
pub use health_data::HealthDataPermissionPort;
pub use key_value::{get_json, set_json, KeyValueStorePort};
pub use onboarding_event::OnboardingEventPort;
pub use secure_storage::{SecureStorageError, SecureStoragePort};
