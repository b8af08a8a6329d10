use thiserror::Error;

use super::ViewId;

#[derive(Error, Debug)]
pub enum LeakError {
    #[error("view '{0}' is already registered")]
    DuplicateRegistration(ViewId),

    #[error("view '{0}' is not registered")]
    MissingRegistration(ViewId),

    #[error("presence probe failed: {0}")]
    ProbeFailure(String),

    #[error("destroy failed: {0}")]
    DestroyFailure(String),

    #[error("invalid configuration: {0}")]
    ConfigError(String),

    #[error("lock poisoned: {0}")]
    LockError(String),
}

pub type Result<T> = std::result::Result<T, LeakError>;

impl<T> From<std::sync::PoisonError<T>> for LeakError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}
