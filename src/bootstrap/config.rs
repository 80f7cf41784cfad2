//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into AppConfig DTO / 将 TOML 解析为 AppConfig DTO
//! - ✅ Fill empty facts from system defaults / 用系统默认值补齐空值
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No business rules / 禁止业务规则**

use anyhow::Context;
use std::path::PathBuf;

use hp_core::app_dirs::AppDirs;
use hp_core::config::AppConfig;
use tracing::info;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// Pure data loading: whatever is in the file becomes the DTO, missing values
/// become empty facts.
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Resolve the effective configuration.
/// 解析最终生效的配置。
///
/// A missing file means "use system defaults rooted at the app data dir".
/// A file that exists but cannot be parsed is an error.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    app_dirs: &AppDirs,
) -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::with_system_defaults(app_dirs.app_data_root.clone());

    match config_path {
        Some(path) if path.exists() => {
            info!(path = %path.display(), "Loading config file");
            Ok(load_config(path)?.or_defaults(&defaults))
        }
        Some(path) => {
            info!(path = %path.display(), "Config file not found, using defaults");
            Ok(defaults)
        }
        None => Ok(defaults),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_core::config::{DEFAULT_KEYCHAIN_SERVICE, DEFAULT_VALIDATION_DEBOUNCE_MS};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn app_dirs() -> AppDirs {
        AppDirs {
            app_data_root: PathBuf::from("/tmp/healthpath-test"),
        }
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
                [storage]
                data_dir = "/srv/healthpath"

                [onboarding]
                validation_debounce_ms = 300
                "#,
            )
            .unwrap();

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/healthpath"));
        assert_eq!(config.validation_debounce_ms, 300);
        assert_eq!(config.keychain_service, "");
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[storage\ndata_dir = ").unwrap();

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();

        assert!(err.to_string().contains("TOML"));
    }

    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let err = load_config(PathBuf::from("/this/path/does/not/exist/config.toml")).unwrap_err();
        assert!(err.to_string().to_lowercase().contains("failed to read"));
    }

    #[test]
    fn test_resolve_config_falls_back_to_defaults() {
        let config =
            resolve_config(Some(PathBuf::from("/nope/config.toml")), &app_dirs()).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/healthpath-test"));
        assert_eq!(config.validation_debounce_ms, DEFAULT_VALIDATION_DEBOUNCE_MS);
        assert_eq!(config.keychain_service, DEFAULT_KEYCHAIN_SERVICE);
        assert_eq!(resolve_config(None, &app_dirs()).unwrap(), config);
    }

    #[test]
    fn test_resolve_config_keeps_file_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[security]\nkeychain_service = \"HealthPath-Dev\"\n")
            .unwrap();

        let config =
            resolve_config(Some(temp_file.path().to_path_buf()), &app_dirs()).unwrap();

        assert_eq!(config.keychain_service, "HealthPath-Dev");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/healthpath-test"));
        assert!(!config.log_to_file);
    }
}
