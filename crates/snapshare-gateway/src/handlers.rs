mod health;
mod share;

pub use health::health_handler;
pub use share::{
    create_share_handler, fallback_handler, get_share_by_path_handler, get_share_handler,
    method_not_allowed_handler, preflight_handler, MISSING_ID,
};
