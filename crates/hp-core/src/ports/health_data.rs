use async_trait::async_trait;

/// Platform health-data authorization (HealthKit or equivalent).
///
/// 平台健康数据授权端口。
#[async_trait]
pub trait HealthDataPermissionPort: Send + Sync {
    /// Ask the platform for read access.
    ///
    /// `Ok(false)` means the user declined. `Err` means the platform could
    /// not present the request at all.
    async fn request_authorization(&self) -> anyhow::Result<bool>;
}
