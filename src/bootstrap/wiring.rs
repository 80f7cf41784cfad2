//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (key-value store, clock) / 创建 infra 层具体实现
//! - ✅ Create platform implementations (credential store, placeholders) / 创建 platform 层具体实现
//! - ✅ Group them into `OnboardingDeps` / 打包为 `OnboardingDeps`
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! ❌ **No configuration validation / 禁止做配置验证**
//!
//! This is the only place allowed to depend on hp-infra + hp-platform + hp-app
//! simultaneously.
//! 这是唯一允许同时依赖 hp-infra、hp-platform 和 hp-app 的地方。

use std::sync::Arc;
use std::time::Duration;

use hp_app::usecases::auth::ACCESS_TOKEN_KEY;
use hp_app::usecases::{OnboardingStatusStore, SignIn, SignOut};
use hp_app::{AppFlow, AppRoute, OnboardingDeps};
use hp_core::config::AppConfig;
use hp_core::ports::*;
use hp_infra::{FileKeyValueStore, SystemClock};
use hp_platform::secure_storage::{create_secure_storage, SecureStorageFactoryError};
use hp_platform::{
    LoggingOnboardingEventPort, PlaceholderAuthenticationPort, PlaceholderHealthDataPort,
};
use tracing::info;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Credential storage initialization failed: {0}")]
    SecureStorageInit(#[from] SecureStorageFactoryError),

    #[error("Onboarding status could not be read: {0}")]
    StatusRead(#[source] anyhow::Error),

    #[error("Access token could not be read: {0}")]
    TokenRead(#[from] SecureStorageError),
}

/// Everything the shell needs after bootstrap.
pub struct AppServices {
    pub onboarding: OnboardingDeps,
    pub flow: Arc<AppFlow>,
    pub sign_in: SignIn,
    pub sign_out: SignOut,
}

/// Build all adapters for `config` and pick the initial route.
pub async fn wire_dependencies(config: &AppConfig) -> WiringResult<AppServices> {
    let secure_storage = create_secure_storage(&config.keychain_service, &config.data_dir)?;
    wire_with_secure_storage(config, secure_storage).await
}

async fn wire_with_secure_storage(
    config: &AppConfig,
    secure_storage: Arc<dyn SecureStoragePort>,
) -> WiringResult<AppServices> {
    let key_value: Arc<dyn KeyValueStorePort> =
        Arc::new(FileKeyValueStore::with_defaults(&config.data_dir));
    let auth: Arc<dyn AuthenticationPort> = Arc::new(PlaceholderAuthenticationPort);

    let onboarding_completed = OnboardingStatusStore::new(Arc::clone(&key_value))
        .get()
        .await
        .map_err(WiringError::StatusRead)?
        .has_completed;
    let has_access_token = secure_storage.get(ACCESS_TOKEN_KEY)?.is_some();
    let route = AppFlow::initial_route(onboarding_completed, has_access_token);
    info!(?route, onboarding_completed, has_access_token, "initial route resolved");

    let flow = Arc::new(AppFlow::new(Arc::clone(&key_value), route));
    let flow_manager: Arc<dyn FlowManagerPort> = flow.clone();

    Ok(AppServices {
        sign_in: SignIn::new(
            Arc::clone(&auth),
            Arc::clone(&secure_storage),
            Arc::clone(&flow_manager),
        ),
        sign_out: SignOut::new(
            Arc::clone(&auth),
            Arc::clone(&secure_storage),
            Arc::clone(&flow_manager),
        ),
        onboarding: OnboardingDeps {
            auth,
            health_data: Arc::new(PlaceholderHealthDataPort),
            key_value,
            secure_storage,
            flow_manager,
            events: Arc::new(LoggingOnboardingEventPort),
            clock: Arc::new(SystemClock),
            validation_debounce: Duration::from_millis(config.validation_debounce_ms),
        },
        flow,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_platform::FileSecureStorage;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> AppConfig {
        AppConfig::with_system_defaults(dir.path().to_path_buf())
    }

    fn file_storage(dir: &TempDir) -> Arc<dyn SecureStoragePort> {
        Arc::new(FileSecureStorage::new_in_app_data_root(dir.path()).unwrap())
    }

    #[tokio::test]
    async fn fresh_install_routes_to_onboarding() {
        let dir = TempDir::new().unwrap();

        let services = wire_with_secure_storage(&config(&dir), file_storage(&dir))
            .await
            .unwrap();

        assert_eq!(services.flow.current(), AppRoute::Onboarding);
        assert_eq!(
            services.onboarding.validation_debounce,
            Duration::from_millis(500)
        );
    }

    #[tokio::test]
    async fn completed_without_token_routes_to_authentication() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(FileKeyValueStore::with_defaults(dir.path()));
        OnboardingStatusStore::new(store).mark_completed().await.unwrap();

        let services = wire_with_secure_storage(&config(&dir), file_storage(&dir))
            .await
            .unwrap();

        assert_eq!(services.flow.current(), AppRoute::Authentication);
    }

    #[tokio::test]
    async fn completed_with_token_routes_home() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(FileKeyValueStore::with_defaults(dir.path()));
        OnboardingStatusStore::new(store).mark_completed().await.unwrap();
        let secure = file_storage(&dir);
        secure.set(ACCESS_TOKEN_KEY, b"token").unwrap();

        let services = wire_with_secure_storage(&config(&dir), secure).await.unwrap();

        assert_eq!(services.flow.current(), AppRoute::Home);
    }
}
