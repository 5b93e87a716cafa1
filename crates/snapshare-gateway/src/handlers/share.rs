use crate::error::{AppError, Result};
use crate::model::{CreateShareRequest, CreateShareResponse, GetShareResponse};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Json;
use serde_json::Value;
use snapshare_core::{CreateShare, ShareId, ShareLookup};

pub const MISSING_ID: &str = "Missing id";

/// `POST /`: stores a snapshot and answers with its id and URL.
pub async fn create_share_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateShareResponse>)> {
    // A body that is not valid JSON is a server-side parse failure, not a
    // validation error.
    let request = serde_json::from_slice(&body)
        .and_then(CreateShareRequest::from_body)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let base_url = state
        .base_url_for(&headers, &uri)
        .ok_or_else(|| AppError::Internal("cannot determine service origin".to_string()))?;

    let expiration = request.expiration();
    let created = state
        .shares()
        .create(CreateShare {
            snapshot: request.snapshot.unwrap_or(Value::Null),
            expiration,
        })
        .await?;

    let response = CreateShareResponse {
        url: created.id.to_url(&base_url),
        id: created.id.to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /?id=<id>`
pub async fn get_share_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<GetShareResponse>> {
    let id = first_id(query.as_deref().unwrap_or_default()).unwrap_or_default();
    resolve(&state, id).await
}

/// The first `id` pair of a query string; repeats are ignored.
fn first_id(query: &str) -> Option<String> {
    serde_urlencoded::from_str::<Vec<(String, String)>>(query)
        .ok()?
        .into_iter()
        .find_map(|(key, value)| (key == "id").then_some(value))
}

/// `GET /s/{id}`
pub async fn get_share_by_path_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GetShareResponse>> {
    resolve(&state, id).await
}

async fn resolve(state: &AppState, id: String) -> Result<Json<GetShareResponse>> {
    let id = ShareId::new(id).map_err(|_| AppError::InvalidInput(MISSING_ID.to_string()))?;

    match state.shares().fetch(&id).await? {
        ShareLookup::Found(envelope) => Ok(Json(GetShareResponse {
            id: id.to_string(),
            snapshot: envelope.snapshot,
        })),
        ShareLookup::NotFound => Err(AppError::NotFound),
        ShareLookup::Expired => Err(AppError::Expired),
    }
}

/// `OPTIONS`: the CORS middleware adds the headers.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}

/// Unrouted paths: preflight still succeeds, anything else is 404.
pub async fn fallback_handler(method: Method) -> Result<StatusCode> {
    if method == Method::OPTIONS {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
