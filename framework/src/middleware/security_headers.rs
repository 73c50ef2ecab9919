use super::{Middleware, Next};
use crate::http::{Request, Response, ResponseExt};
use async_trait::async_trait;

/// Fixed security headers attached to every response
pub const SECURITY_HEADERS: [(&str, &str); 4] = [
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "DENY"),
    ("X-XSS-Protection", "1; mode=block"),
    ("Referrer-Policy", "strict-origin-when-cross-origin"),
];

/// Adds [`SECURITY_HEADERS`] to successful and error responses alike
pub struct SecurityHeadersMiddleware {
    headers: Vec<(String, String)>,
}

impl SecurityHeadersMiddleware {
    pub fn new() -> Self {
        Self {
            headers: SECURITY_HEADERS
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }
}

impl Default for SecurityHeadersMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Middleware for SecurityHeadersMiddleware {
    async fn handle(&self, request: Request, next: Next) -> Response {
        next(request).await.with_headers(&self.headers)
    }
}
