use crate::envelope::Envelope;
use crate::error::ShareError;
use crate::share_id::ShareId;
use async_trait::async_trait;
use serde_json::Value;

type Result<T> = std::result::Result<T, ShareError>;

/// How long a new share stays readable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpirationPolicy {
    /// Use the service's configured default TTL.
    Default,
    /// The share never expires.
    Never,
    /// The share expires this many days after creation.
    ///
    /// Zero (and NaN) mean "never expires", matching how a missing TTL
    /// has always been treated.
    AfterDays(f64),
}

/// Parameters for creating a share.
#[derive(Debug, Clone)]
pub struct CreateShare {
    /// The opaque payload to store.
    pub snapshot: Value,
    /// The expiration policy for the share.
    pub expiration: ExpirationPolicy,
}

/// A freshly written share.
#[derive(Debug, Clone)]
pub struct CreatedShare {
    pub id: ShareId,
    pub envelope: Envelope,
}

/// The outcome of looking up a share.
#[derive(Debug, Clone, PartialEq)]
pub enum ShareLookup {
    /// The share exists and is live.
    Found(Envelope),
    /// No record is stored under the id.
    NotFound,
    /// A record exists but is past its expiry. The snapshot is withheld.
    Expired,
}

#[async_trait]
pub trait ShareService: Send + Sync + 'static {
    /// Stores a snapshot under a fresh id.
    async fn create(&self, request: CreateShare) -> Result<CreatedShare>;

    /// Looks up a share. Never mutates the store.
    async fn fetch(&self, id: &ShareId) -> Result<ShareLookup>;
}
