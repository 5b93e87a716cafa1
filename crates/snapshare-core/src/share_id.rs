use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Path segment under which shares are resolved by the frontend.
pub const SHARE_PATH_SEGMENT: &str = "s";

/// The public token naming a share.
///
/// The same string is the store key and the last segment of the
/// shareable URL. Beyond being non-empty nothing is enforced: an
/// unrecognized id simply misses in the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareId(String);

impl ShareId {
    /// Creates a `ShareId` from caller input, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::InvalidShareId(
                "share id cannot be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Creates a `ShareId` without validation.
    ///
    /// Use this only for ids produced by trusted internal sources
    /// (e.g. generators that are guaranteed to produce valid output).
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the shareable URL for this id under the given origin.
    pub fn to_url(&self, base_url: &str) -> String {
        format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            SHARE_PATH_SEGMENT,
            self.0
        )
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ShareId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShareId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
