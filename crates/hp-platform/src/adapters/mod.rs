//! # Platform Adapters / 平台适配器
//!
//! Stand-in implementations for ports whose real backends live outside this
//! workspace (the authentication service, the platform health store, the UI).
//! 外部服务的占位实现，用于在没有真实后端时完成装配。
//!
//! # Modules / 模块
//!
//! - `authentication` - Placeholder authentication service
//! - `health_data` - Placeholder health-data permission
//! - `ui` - Log-only onboarding event sink

pub mod authentication;
pub mod health_data;
pub mod ui;

pub use authentication::PlaceholderAuthenticationPort;
pub use health_data::PlaceholderHealthDataPort;
pub use ui::LoggingOnboardingEventPort;
