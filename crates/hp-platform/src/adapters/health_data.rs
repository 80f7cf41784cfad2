//! Placeholder health-data permission port implementation
//! 占位符健康数据授权端口实现

use async_trait::async_trait;
use hp_core::ports::HealthDataPermissionPort;

/// Used on hosts without a platform health store.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderHealthDataPort;

#[async_trait]
impl HealthDataPermissionPort for PlaceholderHealthDataPort {
    async fn request_authorization(&self) -> anyhow::Result<bool> {
        Err(anyhow::anyhow!(
            "health data store is not available on this platform"
        ))
    }
}
