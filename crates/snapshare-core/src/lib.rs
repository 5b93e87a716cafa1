//! Core types and traits for the Snapshare link sharing service.
//!
//! This crate provides the types shared by the share repository, the
//! storage backends and the HTTP gateway.

pub mod clock;
pub mod envelope;
pub mod error;
pub mod service;
pub mod share_id;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use envelope::{is_blank_snapshot, Envelope, ENVELOPE_VERSION};
pub use error::{CoreError, ShareError, StorageError};
pub use service::{CreateShare, CreatedShare, ExpirationPolicy, ShareLookup, ShareService};
pub use share_id::ShareId;
pub use store::KvStore;
