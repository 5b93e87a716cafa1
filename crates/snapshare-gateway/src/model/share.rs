use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use snapshare_core::ExpirationPolicy;

/// Body of `POST /`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareRequest {
    #[serde(default)]
    pub snapshot: Option<Value>,
    /// Outer `None`: field absent. Inner `None`: explicit `null`.
    #[serde(default, deserialize_with = "present")]
    pub ttl_days: Option<Option<f64>>,
}

impl CreateShareRequest {
    /// Reads the request fields out of a parsed JSON body.
    ///
    /// Only an object carries fields. Arrays, strings, numbers and booleans
    /// read as an empty request, so they fail later as a missing snapshot.
    /// A `null` body is an error.
    pub fn from_body(body: Value) -> Result<Self, serde_json::Error> {
        match body {
            Value::Object(_) | Value::Null => serde_json::from_value(body),
            _ => Ok(Self::default()),
        }
    }

    pub fn expiration(&self) -> ExpirationPolicy {
        match self.ttl_days {
            None => ExpirationPolicy::Default,
            Some(None) => ExpirationPolicy::Never,
            Some(Some(days)) => ExpirationPolicy::AfterDays(days),
        }
    }
}

fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct CreateShareResponse {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct GetShareResponse {
    pub id: String,
    pub snapshot: Value,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
