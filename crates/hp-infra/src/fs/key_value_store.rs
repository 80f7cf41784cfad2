//! File-based key-value store
//!
//! Each key is persisted as its own file under a base directory
//! (`<base>/<key>.json`). Writes go to a temp file first and are renamed into
//! place, so a crash mid-write leaves the previous value intact.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;
use hp_core::ports::KeyValueStorePort;

pub const DEFAULT_STORE_DIR: &str = "store";
const VALUE_EXTENSION: &str = "json";

pub struct FileKeyValueStore {
    base_dir: PathBuf,
    /// Serializes writers so two saves of the same key cannot interleave.
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Create store rooted at `base_dir`
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            write_lock: Mutex::new(()),
        }
    }

    /// Create store under `<app_data_root>/store`
    pub fn with_defaults(app_data_root: &Path) -> Self {
        Self::new(app_data_root.join(DEFAULT_STORE_DIR))
    }

    fn path_for(&self, key: &str) -> anyhow::Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            anyhow::bail!("Invalid store key: {key:?}");
        }
        Ok(self.base_dir.join(format!("{key}.{VALUE_EXTENSION}")))
    }

    async fn ensure_base_dir(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create store directory: {}", e))
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::anyhow!("Failed to read {key}: {}", e)),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension(format!("{VALUE_EXTENSION}.tmp"));

        let _guard = self.write_lock.lock().await;
        self.ensure_base_dir().await?;

        let mut file = fs::File::create(&tmp)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create temp file for {key}: {}", e))?;
        file.write_all(value)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write {key}: {}", e))?;
        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync {key}: {}", e))?;
        drop(file);

        fs::rename(&tmp, &path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to replace {key}: {}", e))?;

        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key)?;
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Removed value");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!("Failed to remove {key}: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_core::ports::{get_json, set_json};
    use hp_core::OnboardingStatus;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_returns_none_when_file_not_exists() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("nonexistent"));

        assert_eq!(store.get("onboarding.completed").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_directory_and_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("nested/store"));

        store.set("onboarding.completed", b"true").await.unwrap();

        assert_eq!(
            store.get("onboarding.completed").await.unwrap(),
            Some(b"true".to_vec())
        );
        let tmp = temp_dir
            .path()
            .join("nested/store/onboarding.completed.json.tmp");
        assert!(!tmp.exists(), "tmp file should be removed after rename");
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().to_path_buf());

        store.set("k", b"first").await.unwrap();
        store.set("k", b"second").await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some(b"second".to_vec()));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().to_path_buf());

        store.set("k", b"v").await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().to_path_buf());

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(store.set(key, b"v").await.is_err(), "key {key:?}");
            assert!(store.get(key).await.is_err(), "key {key:?}");
        }
    }

    #[tokio::test]
    async fn test_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::with_defaults(temp_dir.path());

        assert_eq!(store.base_dir, temp_dir.path().join(DEFAULT_STORE_DIR));
    }

    #[tokio::test]
    async fn test_json_helpers_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().to_path_buf());

        let status = OnboardingStatus {
            has_completed: true,
        };
        set_json(&store, "status", &status).await.unwrap();

        let loaded: Option<OnboardingStatus> = get_json(&store, "status").await.unwrap();
        assert_eq!(loaded, Some(status));
    }

    #[tokio::test]
    async fn test_empty_file_reads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().to_path_buf());

        // Create an empty file
        store.set("status", b"  \n").await.unwrap();

        let loaded: Option<OnboardingStatus> = get_json(&store, "status").await.unwrap();
        assert_eq!(loaded, None);
    }

    #[tokio::test]
    async fn test_invalid_json_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().to_path_buf());

        store.set("status", b"{invalid json").await.unwrap();

        let result: anyhow::Result<Option<OnboardingStatus>> = get_json(&store, "status").await;
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }
}
