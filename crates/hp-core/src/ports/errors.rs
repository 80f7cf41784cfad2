use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,
}
