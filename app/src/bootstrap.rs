//! Global middleware

use kit::{CorsMiddleware, MiddlewareRegistry};

/// The request envelope, with CORS taken from the registered `CorsConfig`
pub fn register() -> MiddlewareRegistry {
    MiddlewareRegistry::envelope(CorsMiddleware::from_config())
}
