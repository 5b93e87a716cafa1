use crate::error::StorageError;
use async_trait::async_trait;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A flat key-value namespace holding serialized envelopes.
///
/// Implementations must make single-key `get` and `set` atomic. Nothing
/// else is required: there are no multi-key operations, and the service
/// never deletes. Expired records are left for the backend to collect, if
/// it ever does.
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    /// Reads the raw value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key is not present.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing whatever was there.
    async fn set(&self, key: &str, value: String) -> Result<()>;
}
