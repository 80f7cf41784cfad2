use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hp_core::ports::{SecureStorageError, SecureStoragePort};

pub const DEFAULT_CREDENTIALS_DIR: &str = "credentials";

/// File-based credential store for development or headless environments.
///
/// 基于文件的凭据存储（开发/无桌面环境回退）。
#[derive(Debug, Clone)]
pub struct FileSecureStorage {
    base_dir: PathBuf,
}

impl FileSecureStorage {
    /// Create file storage rooted at `<app_data_root>/credentials`.
    ///
    /// 在 `<app_data_root>/credentials` 下创建文件凭据存储。
    pub fn new_in_app_data_root(app_data_root: &Path) -> Result<Self, io::Error> {
        let base_dir = app_data_root.join(DEFAULT_CREDENTIALS_DIR);
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Construct with a concrete base directory. The directory must exist.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn file_path(&self, key: &str) -> Result<PathBuf, SecureStorageError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(SecureStorageError::Other(format!(
                "invalid credential key: {key:?}"
            )));
        }
        Ok(self.base_dir.join(format!("{key}.bin")))
    }

    fn io_error(context: &str, err: io::Error) -> SecureStorageError {
        match err.kind() {
            io::ErrorKind::PermissionDenied => {
                SecureStorageError::PermissionDenied(format!("{context}: {err}"))
            }
            _ => SecureStorageError::Other(format!("{context}: {err}")),
        }
    }
}

impl SecureStoragePort for FileSecureStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SecureStorageError> {
        let path = self.file_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Self::io_error("failed to read credential file", err)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), SecureStorageError> {
        let path = self.file_path(key)?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value)
            .map_err(|err| Self::io_error("failed to write credential temp file", err))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&temp_path, fs::Permissions::from_mode(0o600))
                .map_err(|err| Self::io_error("failed to restrict credential file", err))?;
        }

        fs::rename(&temp_path, &path)
            .map_err(|err| Self::io_error("failed to replace credential file", err))
    }

    fn delete(&self, key: &str) -> Result<(), SecureStorageError> {
        let path = self.file_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::io_error("failed to delete credential file", err)),
        }
    }
}
