use async_trait::async_trait;
use dashmap::DashMap;
use snapshare_core::store::{KvStore, Result};
use tracing::trace;

/// In-memory implementation of [`KvStore`] using DashMap.
///
/// DashMap shards its locks, so point reads and writes on different keys
/// do not block each other.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    storage: DashMap<String, String>,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored records, expired ones included.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl KvStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        trace!(key, "reading from in-memory store");
        Ok(self.storage.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        trace!(key, "writing to in-memory store");
        self.storage.insert(key.to_owned(), value);
        Ok(())
    }
}
