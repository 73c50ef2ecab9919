use super::{Middleware, Next};
use crate::config::{Config, CorsConfig};
use crate::http::{HttpResponse, Request, Response, ResponseExt};
use async_trait::async_trait;

/// CORS middleware
///
/// Answers `OPTIONS` preflight requests directly with 204 and the CORS header
/// set, without invoking the rest of the chain. Every other response gets the
/// same header set attached.
pub struct CorsMiddleware {
    headers: Vec<(String, String)>,
}

impl CorsMiddleware {
    pub fn new(config: &CorsConfig) -> Self {
        Self {
            headers: vec![
                (
                    "Access-Control-Allow-Origin".to_string(),
                    config.allow_origin.clone(),
                ),
                (
                    "Access-Control-Allow-Methods".to_string(),
                    config.allow_methods.clone(),
                ),
                (
                    "Access-Control-Allow-Headers".to_string(),
                    config.allow_headers.clone(),
                ),
                (
                    "Access-Control-Max-Age".to_string(),
                    config.max_age.to_string(),
                ),
            ],
        }
    }

    /// Build from the registered `CorsConfig`, or the environment if none is registered
    pub fn from_config() -> Self {
        let config = Config::get::<CorsConfig>().unwrap_or_else(CorsConfig::from_env);
        Self::new(&config)
    }
}

#[async_trait]
impl Middleware for CorsMiddleware {
    async fn handle(&self, request: Request, next: Next) -> Response {
        if request.method() == http::Method::OPTIONS {
            tracing::debug!("answering CORS preflight");
            return Ok(HttpResponse::new().status(204)).with_headers(&self.headers);
        }

        next(request).await.with_headers(&self.headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::future::FutureExt;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn config() -> CorsConfig {
        CorsConfig::builder()
            .allow_origin("*")
            .allow_methods("POST, OPTIONS")
            .allow_headers("Content-Type")
            .max_age(600)
            .build()
    }

    #[tokio::test]
    async fn test_preflight_short_circuits() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();
        let next: Next = Arc::new(move |_req| {
            flag.store(true, Ordering::SeqCst);
            async { Ok(HttpResponse::text("handler")) }.boxed()
        });

        let request = http::Request::builder()
            .method("OPTIONS")
            .uri("/graphql")
            .body(Bytes::new())
            .unwrap();
        let response = CorsMiddleware::new(&config())
            .handle(request.into(), next)
            .await
            .unwrap();

        assert!(!called.load(Ordering::SeqCst));
        assert_eq!(response.status_code(), 204);
        assert_eq!(response.body(), "");
        assert_eq!(response.header_value("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(
            response.header_value("Access-Control-Allow-Methods"),
            Some("POST, OPTIONS")
        );
        assert_eq!(response.header_value("Access-Control-Max-Age"), Some("600"));
    }

    #[tokio::test]
    async fn test_headers_on_error_responses() {
        let next: Next =
            Arc::new(|_req| async { Err(HttpResponse::text("down").status(503)) }.boxed());

        let request = http::Request::builder()
            .method("POST")
            .uri("/graphql")
            .body(Bytes::new())
            .unwrap();
        let response = CorsMiddleware::new(&config())
            .handle(request.into(), next)
            .await
            .unwrap_err();

        assert_eq!(response.status_code(), 503);
        assert_eq!(
            response.header_value("Access-Control-Allow-Headers"),
            Some("Content-Type")
        );
    }
}
