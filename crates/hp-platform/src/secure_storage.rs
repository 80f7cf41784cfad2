//! Credential store selection.

use std::{path::Path, sync::Arc};

use hp_core::ports::SecureStoragePort;
use tracing::{debug, error, warn};

use crate::{
    capability::{detect_credential_backend, CredentialBackend},
    file_secure_storage::FileSecureStorage,
    system_secure_storage::SystemSecureStorage,
};

#[derive(Debug, thiserror::Error)]
pub enum SecureStorageFactoryError {
    #[error("credential storage unsupported: {backend:?}")]
    Unsupported { backend: CredentialBackend },

    #[error("failed to initialize file-based credential store: {0}")]
    FileBasedInit(#[from] std::io::Error),
}

fn storage_for_backend(
    backend: CredentialBackend,
    keychain_service: &str,
    app_data_root: &Path,
) -> Result<Arc<dyn SecureStoragePort>, SecureStorageFactoryError> {
    match backend {
        CredentialBackend::SystemKeychain => {
            Ok(Arc::new(SystemSecureStorage::new(keychain_service)) as Arc<dyn SecureStoragePort>)
        }
        CredentialBackend::File => {
            warn!("Using file-based credential store (insecure fallback for WSL/headless environments)");
            Ok(Arc::new(FileSecureStorage::new_in_app_data_root(app_data_root)?)
                as Arc<dyn SecureStoragePort>)
        }
        CredentialBackend::Unsupported => {
            error!(?backend, "Credential storage unsupported");
            Err(SecureStorageFactoryError::Unsupported { backend })
        }
    }
}

/// Build the credential store for this host.
pub fn create_secure_storage(
    keychain_service: &str,
    app_data_root: &Path,
) -> Result<Arc<dyn SecureStoragePort>, SecureStorageFactoryError> {
    let backend = detect_credential_backend();
    debug!(?backend, keychain_service, "Detected credential backend");
    storage_for_backend(backend, keychain_service, app_data_root)
}
