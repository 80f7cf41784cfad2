//! Credential backend detection.
//!
//! Picks the OS keychain where one is reachable and falls back to the
//! file-based store on WSL and headless Linux.

use tracing::{info, warn};

/// Credential store backend available on the current host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialBackend {
    /// macOS Keychain, Windows Credential Manager, Linux Secret Service
    SystemKeychain,
    /// Files under the app data root (WSL, headless Linux)
    File,
    Unsupported,
}

/// Detect the credential backend for this process.
pub fn detect_credential_backend() -> CredentialBackend {
    #[cfg(any(target_os = "macos", target_os = "windows", target_os = "ios"))]
    {
        CredentialBackend::SystemKeychain
    }

    #[cfg(target_os = "linux")]
    {
        let proc_version = std::fs::read_to_string("/proc/version").unwrap_or_default();
        let backend = linux_backend(&proc_version, |name| std::env::var_os(name).is_some());
        match backend {
            CredentialBackend::SystemKeychain => {
                info!("Linux desktop session detected, using system keychain")
            }
            _ => warn!("No desktop session or WSL detected, using file-based credential store"),
        }
        backend
    }

    #[cfg(not(any(
        target_os = "macos",
        target_os = "windows",
        target_os = "ios",
        target_os = "linux"
    )))]
    {
        warn!("No credential backend for this platform");
        CredentialBackend::Unsupported
    }
}

/// Linux rules: WSL never has a usable keychain; otherwise both a display
/// and a D-Bus session bus are required for a keyring daemon.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn linux_backend(proc_version: &str, has_env: impl Fn(&str) -> bool) -> CredentialBackend {
    let is_wsl = proc_version.contains("Microsoft")
        || proc_version.contains("WSL")
        || has_env("WSL_DISTRO_NAME")
        || has_env("WSL_INTEROP");
    if is_wsl {
        return CredentialBackend::File;
    }

    let has_display = has_env("DISPLAY") || has_env("WAYLAND_DISPLAY");
    if has_display && has_env("DBUS_SESSION_BUS_ADDRESS") {
        CredentialBackend::SystemKeychain
    } else {
        CredentialBackend::File
    }
}
