//! HTTP boundary for the Snapshare link sharing service.
//!
//! The router dispatches on method, maps share outcomes onto status codes
//! and stamps CORS headers on every response.

pub mod app;
pub mod cli;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use cors::CorsPolicy;
pub use error::AppError;
pub use state::AppState;
