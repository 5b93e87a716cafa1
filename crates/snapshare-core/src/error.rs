use thiserror::Error;

/// Result type for operations defined in this crate.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid share id: {0}")]
    InvalidShareId(String),
}

/// Errors surfaced by a [`KvStore`](crate::store::KvStore) backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors returned by a [`ShareService`](crate::service::ShareService).
///
/// A missing or expired share is not an error; see
/// [`ShareLookup`](crate::service::ShareLookup).
#[derive(Debug, Clone, Error)]
pub enum ShareError {
    /// The caller supplied something the service refuses to store.
    #[error("{0}")]
    InvalidInput(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("corrupt envelope for '{id}': {reason}")]
    CorruptEnvelope { id: String, reason: String },
}
