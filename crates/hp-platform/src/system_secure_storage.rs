use keyring::Entry;
use hp_core::config::DEFAULT_KEYCHAIN_SERVICE;
use hp_core::ports::{SecureStorageError, SecureStoragePort};

/// System keychain-backed credential store.
///
/// 基于系统钥匙串的凭据存储实现。
#[derive(Debug, Clone)]
pub struct SystemSecureStorage {
    service: String,
}

impl Default for SystemSecureStorage {
    fn default() -> Self {
        Self::new(DEFAULT_KEYCHAIN_SERVICE)
    }
}

impl SystemSecureStorage {
    /// Create a store whose entries live under `service` in the keychain.
    ///
    /// 使用给定的钥匙串服务名创建实例。
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    fn entry_for_key(&self, key: &str) -> Result<Entry, SecureStorageError> {
        Entry::new(&self.service, key)
            .map_err(|e| SecureStorageError::Other(format!("failed to create keyring entry: {e}")))
    }
}

fn map_keyring_error(action: &str, err: keyring::Error) -> SecureStorageError {
    match err {
        keyring::Error::PlatformFailure(msg) => SecureStorageError::PermissionDenied(msg.to_string()),
        keyring::Error::NoStorageAccess(msg) => SecureStorageError::Unavailable(msg.to_string()),
        keyring::Error::BadEncoding(bytes) => SecureStorageError::Corrupt(format!(
            "failed to {action} secure storage: {} undecodable bytes",
            bytes.len()
        )),
        other => SecureStorageError::Other(format!("failed to {action} secure storage: {other}")),
    }
}

impl SecureStoragePort for SystemSecureStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SecureStorageError> {
        let entry = self.entry_for_key(key)?;
        match entry.get_secret() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(map_keyring_error("read", err)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), SecureStorageError> {
        let entry = self.entry_for_key(key)?;
        entry
            .set_secret(value)
            .map_err(|err| map_keyring_error("write", err))
    }

    fn delete(&self, key: &str) -> Result<(), SecureStorageError> {
        let entry = self.entry_for_key(key)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(map_keyring_error("delete", err)),
        }
    }
}
