use axum::http::{header, HeaderMap, Uri};
use snapshare_core::ShareService;
use std::sync::Arc;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

#[derive(Clone)]
pub struct AppState {
    shares: Arc<dyn ShareService>,
    base_url: Option<String>,
}

impl AppState {
    /// `public_base_url` overrides the origin derived from each request.
    pub fn new(shares: Arc<dyn ShareService>, public_base_url: Option<String>) -> Self {
        Self {
            shares,
            base_url: public_base_url.map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    pub fn shares(&self) -> &dyn ShareService {
        self.shares.as_ref()
    }

    /// The origin share URLs are built on.
    ///
    /// Falls back to the request's `Host` header (or URI authority) with the
    /// scheme from `X-Forwarded-Proto`, defaulting to `http`.
    pub fn base_url_for(&self, headers: &HeaderMap, uri: &Uri) -> Option<String> {
        if let Some(base_url) = &self.base_url {
            return Some(base_url.clone());
        }

        let host = headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .or_else(|| uri.authority().map(|authority| authority.as_str()))?;
        let scheme = headers
            .get(FORWARDED_PROTO)
            .and_then(|value| value.to_str().ok())
            .or_else(|| uri.scheme_str())
            .unwrap_or("http");

        Some(format!("{scheme}://{host}"))
    }
}
