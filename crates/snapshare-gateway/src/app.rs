use crate::cors::{apply_cors, CorsPolicy};
use crate::error::AppError;
use crate::handlers::{
    create_share_handler, fallback_handler, get_share_by_path_handler, get_share_handler,
    health_handler, method_not_allowed_handler, preflight_handler,
};
use crate::state::AppState;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub struct App {}

impl App {
    pub fn router(state: AppState, cors: CorsPolicy) -> Router {
        Router::new()
            .route(
                "/",
                get(get_share_handler)
                    .post(create_share_handler)
                    .options(preflight_handler)
                    .fallback(method_not_allowed_handler),
            )
            .route(
                "/s/{id}",
                get(get_share_by_path_handler)
                    .options(preflight_handler)
                    .fallback(method_not_allowed_handler),
            )
            .route(
                "/health",
                get(health_handler)
                    .options(preflight_handler)
                    .fallback(method_not_allowed_handler),
            )
            .fallback(fallback_handler)
            .with_state(state)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TraceLayer::new_for_http())
            // Outermost, so error and panic responses carry CORS headers too.
            .layer(middleware::from_fn_with_state(Arc::new(cors), apply_cors))
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::Internal(message).into_response()
}
