//! # hp-platform
//!
//! Platform-specific implementations for HealthPath.
//!
//! This crate contains adapters that talk to the operating system: the
//! keychain-backed credential store (with a file fallback for headless hosts),
//! application data directory resolution, and placeholder adapters for the
//! external services.

pub mod adapters;
pub mod app_dirs;
pub mod capability;
pub mod file_secure_storage;
pub mod secure_storage;
pub mod system_secure_storage;

pub use adapters::{
    LoggingOnboardingEventPort, PlaceholderAuthenticationPort, PlaceholderHealthDataPort,
};
pub use app_dirs::DirsAppDirsAdapter;
pub use file_secure_storage::FileSecureStorage;
pub use secure_storage::{create_secure_storage, SecureStorageFactoryError};
pub use system_secure_storage::SystemSecureStorage;
