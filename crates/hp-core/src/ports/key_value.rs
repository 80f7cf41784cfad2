//! Local key-value persistence port
//!
//! This port defines the contract for small values that must survive app
//! restarts (the onboarding draft, the completion flag). Implementations are
//! provided by the infrastructure layer (e.g., file-based storage).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// Read the raw value stored under `key`, if any.
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// Read and decode a JSON value. Blank values read as `None`.
pub async fn get_json<T>(store: &dyn KeyValueStorePort, key: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    match store.get(key).await? {
        None => Ok(None),
        Some(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(None),
        Some(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| anyhow::anyhow!("Failed to parse value for key {key}: {e}")),
    }
}

/// Encode `value` as JSON and store it under `key`.
pub async fn set_json<T>(store: &dyn KeyValueStorePort, key: &str, value: &T) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| anyhow::anyhow!("Failed to serialize value for key {key}: {e}"))?;
    store.set(key, &bytes).await
}
