//! Origin allow-listing.
//!
//! Every response gets an `access-control-allow-origin` header. A request
//! origin on the allow-list is echoed back; any other origin (or none) gets
//! the first allow-list entry. An unlisted origin is never reflected.

use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ORIGIN, VARY,
};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use thiserror::Error;

pub const ALLOWED_METHODS: &str = "GET,POST,OPTIONS";
pub const ALLOWED_HEADERS: &str = "content-type";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorsError {
    #[error("at least one allowed origin is required")]
    Empty,
    #[error("invalid origin '{0}'")]
    InvalidOrigin(String),
}

/// The set of origins allowed to call the service.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    /// Never empty; the first entry is the fallback origin.
    allowed: Vec<HeaderValue>,
}

impl CorsPolicy {
    pub fn new<I, T>(origins: I) -> Result<Self, CorsError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let allowed = origins
            .into_iter()
            .map(|origin| {
                let origin = origin.as_ref().trim().trim_end_matches('/');
                HeaderValue::from_str(origin)
                    .ok()
                    .filter(|_| !origin.is_empty())
                    .ok_or_else(|| CorsError::InvalidOrigin(origin.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if allowed.is_empty() {
            return Err(CorsError::Empty);
        }

        Ok(Self { allowed })
    }

    /// The origin advertised to callers that are not on the list.
    pub fn default_origin(&self) -> &HeaderValue {
        &self.allowed[0]
    }

    /// Picks the `access-control-allow-origin` value for a request origin.
    pub fn allow_origin(&self, request_origin: Option<&HeaderValue>) -> HeaderValue {
        match request_origin {
            Some(origin) if self.allowed.contains(origin) => origin.clone(),
            _ => self.default_origin().clone(),
        }
    }

    /// Stamps the CORS headers onto a response.
    pub fn apply(&self, request_origin: Option<&HeaderValue>, headers: &mut HeaderMap) {
        headers.insert(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            self.allow_origin(request_origin),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        headers.append(VARY, HeaderValue::from_static("origin"));
    }
}

/// Middleware applying a [`CorsPolicy`] to every response.
pub async fn apply_cors(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request.headers().get(ORIGIN).cloned();
    let mut response = next.run(request).await;
    policy.apply(origin.as_ref(), response.headers_mut());
    response
}
