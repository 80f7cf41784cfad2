//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No business rules / 禁止业务规则**
//!
//! Values missing from the file map to empty facts (`""`, `0`, `false`).
//! Choosing a usable value for an empty fact is the caller's job.

use std::path::PathBuf;

/// Debounce used when the file does not provide one.
pub const DEFAULT_VALIDATION_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "HealthPath";

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the key-value store and logs (path only, no existence check)
    pub data_dir: PathBuf,

    /// Delay before a field edit is validated; 0 means "not set"
    pub validation_debounce_ms: u64,

    /// Service name under which credentials are stored in the OS keychain
    pub keychain_service: String,

    /// Write logs to a rolling file in addition to stdout
    pub log_to_file: bool,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            data_dir: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("data_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            validation_debounce_ms: toml_value
                .get("onboarding")
                .and_then(|o| o.get("validation_debounce_ms"))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(0),
            keychain_service: toml_value
                .get("security")
                .and_then(|s| s.get("keychain_service"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            log_to_file: toml_value
                .get("logging")
                .and_then(|l| l.get("log_to_file"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        })
    }

    /// Create AppConfig with system-default values rooted at `data_dir`.
    /// 生产环境使用：以 `data_dir` 为根目录创建默认配置。
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            validation_debounce_ms: DEFAULT_VALIDATION_DEBOUNCE_MS,
            keychain_service: DEFAULT_KEYCHAIN_SERVICE.to_string(),
            log_to_file: true,
        }
    }

    /// Fill empty facts from `defaults`.
    pub fn or_defaults(self, defaults: &AppConfig) -> Self {
        Self {
            data_dir: if self.data_dir.as_os_str().is_empty() {
                defaults.data_dir.clone()
            } else {
                self.data_dir
            },
            validation_debounce_ms: if self.validation_debounce_ms == 0 {
                defaults.validation_debounce_ms
            } else {
                self.validation_debounce_ms
            },
            keychain_service: if self.keychain_service.is_empty() {
                defaults.keychain_service.clone()
            } else {
                self.keychain_service
            },
            log_to_file: self.log_to_file,
        }
    }
}
