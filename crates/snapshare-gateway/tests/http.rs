use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use jiff::{SignedDuration, Timestamp};
use serde_json::{json, Value};
use snapshare_core::{ManualClock, ShareService, StorageError};
use snapshare_gateway::{App, AppState, CorsPolicy};
use snapshare_generator::RandomGenerator;
use snapshare_share::{ShareRepository, ShareSettings};
use snapshare_storage::InMemoryStore;
use std::sync::Arc;
use tower::ServiceExt;

const BASE_URL: &str = "https://share.example";
const APP_ORIGIN: &str = "https://app.example";
const OTHER_ORIGIN: &str = "https://studio.example";

struct TestApp {
    router: Router,
    store: Arc<InMemoryStore>,
    clock: ManualClock,
}

impl TestApp {
    fn new() -> Self {
        Self::with_base_url(Some(BASE_URL))
    }

    fn with_base_url(base_url: Option<&str>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = ManualClock::new(Timestamp::from_second(1_700_000_000).unwrap());
        let shares: Arc<dyn ShareService> = Arc::new(ShareRepository::with_clock(
            Arc::clone(&store),
            RandomGenerator::new(),
            clock.clone(),
            ShareSettings::default(),
        ));
        let state = AppState::new(shares, base_url.map(str::to_string));
        let cors = CorsPolicy::new([APP_ORIGIN, OTHER_ORIGIN]).unwrap();

        Self {
            router: App::router(state, cors),
            store,
            clock,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn post(&self, body: Value) -> Response {
        self.send(
            Request::post("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn get(&self, uri: &str) -> Response {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn create(&self, body: Value) -> String {
        let response = self.post(body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["id"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn allow_origin(response: &Response) -> &str {
    response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN]
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let app = TestApp::new();

    let response = app
        .post(json!({"snapshot": {"shape": "circle", "r": 5}, "ttlDays": 90}))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    let id = body["id"].as_str().unwrap();
    assert_eq!(id.len(), 8);
    assert_eq!(body["url"], format!("{BASE_URL}/s/{id}"));

    let response = app.get(&format!("/?id={id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"id": id, "snapshot": {"shape": "circle", "r": 5}})
    );
}

#[tokio::test]
async fn path_form_resolves_the_same_share() {
    let app = TestApp::new();
    let id = app.create(json!({"snapshot": [1, 2, 3]})).await;

    let response = app.get(&format!("/s/{id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["snapshot"], json!([1, 2, 3]));
}

#[tokio::test]
async fn missing_snapshot_is_bad_request_without_write() {
    let app = TestApp::new();

    for body in [json!({}), json!({"snapshot": null}), json!({"snapshot": ""})] {
        let response = app.post(body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({"error": "Missing snapshot"}));
    }

    assert!(app.store.is_empty());
}

#[tokio::test]
async fn malformed_body_is_internal_error() {
    let app = TestApp::new();

    let response = app
        .send(
            Request::post("/")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json_body(response).await["error"].is_string());
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn non_object_body_is_missing_snapshot() {
    let app = TestApp::new();

    for body in [json!([1, 2]), json!("snapshot"), json!(42)] {
        let response = app.post(body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({"error": "Missing snapshot"}));
    }

    assert!(app.store.is_empty());
}

#[tokio::test]
async fn null_body_is_internal_error() {
    let app = TestApp::new();

    let response = app.post(Value::Null).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json_body(response).await["error"].is_string());
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn repeated_id_uses_the_first_value() {
    let app = TestApp::new();
    let id = app.create(json!({"snapshot": {"a": 1}})).await;

    let response = app.get(&format!("/?id={id}&id=zzzzzzzz")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["id"], id.as_str());

    let response = app.get("/?id=a&id=b").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({"error": "Not found"}));
}

#[tokio::test]
async fn missing_id_is_bad_request() {
    let app = TestApp::new();

    for uri in ["/", "/?id="] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({"error": "Missing id"}));
    }
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/?id=zzzzzzzz").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({"error": "Not found"}));
}

#[tokio::test]
async fn expired_share_is_gone() {
    let app = TestApp::new();
    let id = app.create(json!({"snapshot": {"a": 1}, "ttlDays": 1})).await;

    app.clock.advance(SignedDuration::from_hours(48));

    let response = app.get(&format!("/?id={id}")).await;
    assert_eq!(response.status(), StatusCode::GONE);
    assert_eq!(json_body(response).await, json!({"error": "Expired"}));
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn null_and_zero_ttl_never_expire() {
    let app = TestApp::new();
    let never = app.create(json!({"snapshot": 1, "ttlDays": null})).await;
    let zero = app.create(json!({"snapshot": 1, "ttlDays": 0})).await;
    let default = app.create(json!({"snapshot": 1})).await;

    app.clock.advance(SignedDuration::from_hours(24 * 365 * 100));

    for id in [&never, &zero] {
        let response = app.get(&format!("/?id={id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = app.get(&format!("/?id={default}")).await;
    assert_eq!(response.status(), StatusCode::GONE);
}

#[tokio::test]
async fn preflight_is_no_content_with_cors() {
    let app = TestApp::new();

    let response = app
        .send(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/")
                .header(header::ORIGIN, OTHER_ORIGIN)
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(allow_origin(&response), OTHER_ORIGIN);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET,POST,OPTIONS"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "content-type"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn unlisted_origin_is_not_reflected() {
    let app = TestApp::new();

    let response = app
        .send(
            Request::get("/?id=whatever")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(allow_origin(&response), APP_ORIGIN);
}

#[tokio::test]
async fn other_methods_are_not_allowed_with_cors() {
    let app = TestApp::new();

    for method in [Method::PUT, Method::DELETE, Method::PATCH] {
        let response = app
            .send(
                Request::builder()
                    .method(method)
                    .uri("/")
                    .header(header::ORIGIN, APP_ORIGIN)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(allow_origin(&response), APP_ORIGIN);
        assert_eq!(
            json_body(response).await,
            json!({"error": "Method not allowed"})
        );
    }
}

#[tokio::test]
async fn health_rejects_other_methods_as_json() {
    let app = TestApp::new();

    let response = app
        .send(Request::post("/health").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(allow_origin(&response), APP_ORIGIN);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Method not allowed"})
    );
}

#[tokio::test]
async fn preflight_succeeds_on_any_path() {
    let app = TestApp::new();

    for uri in ["/health", "/anything", "/s/abc/extra"] {
        let response = app
            .send(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri(uri)
                    .header(header::ORIGIN, OTHER_ORIGIN)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT, "{uri}");
        assert_eq!(allow_origin(&response), OTHER_ORIGIN);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
}

#[tokio::test]
async fn unknown_path_is_not_found_with_cors() {
    let app = TestApp::new();

    let response = app.get("/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(allow_origin(&response), APP_ORIGIN);
}

#[tokio::test]
async fn url_is_derived_from_host_when_unconfigured() {
    let app = TestApp::with_base_url(None);

    let response = app
        .send(
            Request::post("/")
                .header(header::HOST, "shares.internal:8080")
                .header("x-forwarded-proto", "https")
                .body(Body::from(json!({"snapshot": {"a": 1}}).to_string()))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    let id = body["id"].as_str().unwrap();
    assert_eq!(body["url"], format!("https://shares.internal:8080/s/{id}"));
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

mod failures {
    use super::*;
    use async_trait::async_trait;
    use snapshare_core::{CreateShare, CreatedShare, ShareError, ShareId, ShareLookup};

    struct BrokenShares;

    #[async_trait]
    impl ShareService for BrokenShares {
        async fn create(&self, _request: CreateShare) -> Result<CreatedShare, ShareError> {
            Err(StorageError::Unavailable("connection refused".to_string()).into())
        }

        async fn fetch(&self, _id: &ShareId) -> Result<ShareLookup, ShareError> {
            panic!("store exploded");
        }
    }

    fn broken_app() -> Router {
        let state = AppState::new(Arc::new(BrokenShares), Some(BASE_URL.to_string()));
        App::router(state, CorsPolicy::new([APP_ORIGIN]).unwrap())
    }

    #[tokio::test]
    async fn store_failure_is_internal_error_with_cors() {
        let response = broken_app()
            .oneshot(
                Request::post("/")
                    .body(Body::from(json!({"snapshot": 1}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(allow_origin(&response), APP_ORIGIN);
        assert_eq!(
            json_body(response).await,
            json!({"error": "storage error: storage backend unavailable: connection refused"})
        );
    }

    #[tokio::test]
    async fn panic_is_internal_error_with_cors() {
        let response = broken_app()
            .oneshot(Request::get("/?id=anything").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(allow_origin(&response), APP_ORIGIN);
        assert_eq!(json_body(response).await, json!({"error": "store exploded"}));
    }
}
