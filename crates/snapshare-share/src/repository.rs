use crate::settings::ShareSettings;
use async_trait::async_trait;
use jiff::Timestamp;
use snapshare_core::{
    is_blank_snapshot, Clock, CreateShare, CreatedShare, Envelope, ExpirationPolicy, KvStore,
    ShareError, ShareId, ShareLookup, ShareService, StorageError, SystemClock,
};
use snapshare_generator::Generator;
use std::sync::Arc;
use tracing::{debug, info};

type Result<T> = std::result::Result<T, ShareError>;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Message returned when a create request carries no usable snapshot.
pub const MISSING_SNAPSHOT: &str = "Missing snapshot";
/// Message returned when a TTL cannot be turned into an expiry instant.
pub const INVALID_TTL: &str = "Invalid ttlDays";

/// Owns envelope construction and the expiry check on top of a [`KvStore`].
///
/// Every call is an independent point read or write; the repository keeps
/// no mutable state of its own. Expiry is evaluated lazily on each read
/// against the injected [`Clock`], and expired records are never removed.
#[derive(Debug)]
pub struct ShareRepository<S, G, C = SystemClock> {
    store: Arc<S>,
    generator: G,
    clock: C,
    settings: ShareSettings,
}

impl<S: KvStore, G: Generator> ShareRepository<S, G> {
    /// Creates a repository driven by the system clock.
    pub fn new(store: Arc<S>, generator: G, settings: ShareSettings) -> Self {
        Self::with_clock(store, generator, SystemClock, settings)
    }
}

impl<S: KvStore, G: Generator, C: Clock> ShareRepository<S, G, C> {
    /// Creates a repository with an explicit clock.
    pub fn with_clock(store: Arc<S>, generator: G, clock: C, settings: ShareSettings) -> Self {
        Self {
            store,
            generator,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &ShareSettings {
        &self.settings
    }

    fn ttl_days(&self, policy: ExpirationPolicy) -> Option<f64> {
        match policy {
            ExpirationPolicy::Default => self.settings.default_ttl_days,
            ExpirationPolicy::Never => None,
            ExpirationPolicy::AfterDays(days) => Some(days),
        }
    }
}

/// Computes the expiry instant for a share created at `created_at`.
///
/// Zero and NaN count as "no TTL", the same as `None`.
fn expires_at(created_at: Timestamp, ttl_days: Option<f64>) -> Result<Option<Timestamp>> {
    let Some(days) = ttl_days.filter(|days| *days != 0.0 && !days.is_nan()) else {
        return Ok(None);
    };

    let invalid = || ShareError::InvalidInput(INVALID_TTL.to_string());

    let ttl_ms = days * MILLIS_PER_DAY;
    if !ttl_ms.is_finite() || ttl_ms.abs() >= i64::MAX as f64 {
        return Err(invalid());
    }

    let expires_ms = created_at
        .as_millisecond()
        .checked_add(ttl_ms as i64)
        .ok_or_else(invalid)?;

    Timestamp::from_millisecond(expires_ms)
        .map(Some)
        .map_err(|_| invalid())
}

#[async_trait]
impl<S: KvStore, G: Generator, C: Clock> ShareService for ShareRepository<S, G, C> {
    async fn create(&self, request: CreateShare) -> Result<CreatedShare> {
        if is_blank_snapshot(&request.snapshot) {
            return Err(ShareError::InvalidInput(MISSING_SNAPSHOT.to_string()));
        }

        // Envelopes carry millisecond precision; drop the rest so the
        // returned envelope matches what a later fetch reads back.
        let now = self.clock.now();
        let created_at = Timestamp::from_millisecond(now.as_millisecond()).unwrap_or(now);
        let expires_at = expires_at(created_at, self.ttl_days(request.expiration))?;

        let id: ShareId = self.generator.generate().into();
        let envelope = Envelope::new(request.snapshot, created_at, expires_at);

        let raw = serde_json::to_string(&envelope).map_err(|e| {
            StorageError::InvalidData(format!("failed to serialize envelope: {e}"))
        })?;
        self.store.set(id.as_str(), raw).await?;

        info!(id = %id, expires_at = ?envelope.expires_at, "created share");

        Ok(CreatedShare { id, envelope })
    }

    async fn fetch(&self, id: &ShareId) -> Result<ShareLookup> {
        let Some(raw) = self.store.get(id.as_str()).await? else {
            debug!(id = %id, "share not found");
            return Ok(ShareLookup::NotFound);
        };

        let envelope: Envelope =
            serde_json::from_str(&raw).map_err(|e| ShareError::CorruptEnvelope {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        if envelope.is_expired_at(self.clock.now()) {
            debug!(id = %id, expires_at = ?envelope.expires_at, "share expired");
            return Ok(ShareLookup::Expired);
        }

        Ok(ShareLookup::Found(envelope))
    }
}
