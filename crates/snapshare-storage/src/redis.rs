use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use snapshare_core::store::{KvStore, Result};
use snapshare_core::StorageError;
use tracing::{debug, trace, warn};

/// Key prefix used when none is configured.
pub const DEFAULT_KEY_PREFIX: &str = "snapshare:share:";

/// A Redis-backed [`KvStore`].
///
/// Values are written with plain `SET` and no Redis TTL: an expired share
/// must stay readable so callers can tell "expired" apart from "never
/// existed".
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
    key_prefix: String,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StorageError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() || message.to_ascii_lowercase().contains("timed out") {
        StorageError::Timeout(message)
    } else if err.is_connection_dropped() || err.is_connection_refusal() {
        StorageError::Unavailable(message)
    } else {
        StorageError::Operation(message)
    }
}

impl RedisStore {
    /// Creates a store over an existing multiplexed connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self::with_prefix(conn, DEFAULT_KEY_PREFIX)
    }

    /// Creates a store with a custom key prefix (e.g. `"myapp:share:"`).
    pub fn with_prefix(conn: MultiplexedConnection, key_prefix: impl Into<String>) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Opens a connection to `redis_url` and wraps it.
    pub async fn connect(redis_url: &str, key_prefix: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| map_redis_error("invalid redis url", e))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("failed to connect to Redis", e))?;
        Ok(Self::with_prefix(conn, key_prefix))
    }

    fn store_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let store_key = self.store_key(key);
        trace!(key, "fetching value from Redis");

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(&store_key).await {
            Ok(Some(value)) => {
                debug!(key, "hit in Redis");
                Ok(Some(value))
            }
            Ok(None) => {
                trace!(key, "miss in Redis");
                Ok(None)
            }
            Err(e) => {
                warn!(key, error = %e, "Redis error on get");
                Err(map_redis_error("failed to fetch value from Redis", e))
            }
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let store_key = self.store_key(key);
        trace!(key, "writing value to Redis");

        let mut conn = self.conn.clone();
        match conn.set::<_, _, ()>(&store_key, value).await {
            Ok(()) => {
                debug!(key, "stored value in Redis");
                Ok(())
            }
            Err(e) => {
                warn!(key, error = %e, "Redis error on set");
                Err(map_redis_error("failed to write value to Redis", e))
            }
        }
    }
}
