//! # hp-infra
//!
//! Infrastructure adapters for HealthPath: file-backed key-value persistence
//! and the system clock.

pub mod fs;
pub mod time;

pub use fs::FileKeyValueStore;
pub use time::SystemClock;
