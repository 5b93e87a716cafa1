mod health;
mod share;

pub use health::HealthResponse;
pub use share::{CreateShareRequest, CreateShareResponse, ErrorResponse, GetShareResponse};
