use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema version written into every new envelope.
pub const ENVELOPE_VERSION: u32 = 1;

/// The stored record wrapping a snapshot with its lifetime metadata.
///
/// Envelopes are immutable once written. `expires_at` is fixed at creation
/// and never extended; an envelope past that instant is still physically
/// stored but is never handed out as valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Schema version tag. Early records used the short key `v`.
    #[serde(alias = "v")]
    pub version: u32,
    /// Creation instant, milliseconds since the Unix epoch on the wire.
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub created_at: Timestamp,
    /// Absolute expiry instant; `None` means the share never expires.
    #[serde(default, with = "jiff::fmt::serde::timestamp::millisecond::optional")]
    pub expires_at: Option<Timestamp>,
    /// Caller payload, stored and returned verbatim.
    #[serde(default)]
    pub snapshot: Value,
}

impl Envelope {
    pub fn new(snapshot: Value, created_at: Timestamp, expires_at: Option<Timestamp>) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            created_at,
            expires_at,
            snapshot,
        }
    }

    /// Whether the envelope is past its expiry at `now`.
    ///
    /// The boundary instant itself still counts as live.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }
}

/// Returns `true` for snapshots that count as missing: `null`, `false`,
/// numeric zero and the empty string.
///
/// Empty arrays and objects are real payloads and are accepted.
pub fn is_blank_snapshot(snapshot: &Value) -> bool {
    match snapshot {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
