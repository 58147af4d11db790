pub mod auth;
pub mod error_handler;
pub mod rate_limit;
pub mod request_id;

pub use auth::{hash_api_key, verify_api_key, ApiKeyAuth, ApiKeyRecord, StaffId};
pub use error_handler::{json_error_handler, query_error_handler, ErrorLogger};
pub use rate_limit::RateLimiter;
pub use request_id::{RequestId, RequestIdValue};

/// Paths served without an API key or rate limit
pub fn is_public_path(path: &str) -> bool {
    matches!(path, "/" | "/health" | "/ready")
}
