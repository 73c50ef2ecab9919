//! Global middleware, in the order it wraps every request

use super::{
    into_boxed, BoxedMiddleware, CatchPanicMiddleware, CorsMiddleware, Middleware,
    RequestIdMiddleware, SecurityHeadersMiddleware,
};

/// Middleware applied to every request, outermost first
///
/// Global middleware wraps routing, so it also sees requests that match no
/// route (CORS preflight, 404s). Built once in the application's bootstrap
/// and handed to the server.
///
/// ```rust,ignore
/// Application::new()
///     .bootstrap(|| MiddlewareRegistry::envelope(CorsMiddleware::from_config()))
/// ```
#[derive(Clone, Default)]
pub struct MiddlewareRegistry {
    global: Vec<BoxedMiddleware>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard request envelope
    ///
    /// 1. request id: opens the span, so every later line carries the id
    /// 2. security headers
    /// 3. CORS: answers preflight before anything below runs
    /// 4. panic guard: innermost, so its 500 still gets both header sets
    pub fn envelope(cors: CorsMiddleware) -> Self {
        Self::new()
            .append(RequestIdMiddleware)
            .append(SecurityHeadersMiddleware::new())
            .append(cors)
            .append(CatchPanicMiddleware)
    }

    /// Add middleware inside everything already registered
    pub fn append<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.global.push(into_boxed(middleware));
        self
    }

    pub fn global_middleware(&self) -> &[BoxedMiddleware] {
        &self.global
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CorsConfig;
    use crate::http::{Request, Response};
    use crate::middleware::{MiddlewareChain, REQUEST_ID_HEADER, SECURITY_HEADERS};
    use crate::routing::BoxedHandler;
    use bytes::Bytes;
    use futures::future::FutureExt;
    use std::sync::Arc;

    fn cors() -> CorsMiddleware {
        CorsMiddleware::new(
            &CorsConfig::builder()
                .allow_origin("*")
                .allow_methods("POST, OPTIONS")
                .allow_headers("Content-Type")
                .max_age(60)
                .build(),
        )
    }

    async fn run(registry: &MiddlewareRegistry, handler: BoxedHandler) -> Response {
        let mut chain = MiddlewareChain::new();
        chain.extend(registry.global_middleware().iter().cloned());
        chain
            .execute(http::Request::new(Bytes::new()).into(), Arc::new(handler))
            .await
    }

    async fn explode(_req: Request) -> Response {
        panic!("handler blew up")
    }

    #[test]
    fn test_envelope_has_four_layers() {
        assert_eq!(MiddlewareRegistry::envelope(cors()).global_middleware().len(), 4);
        assert!(MiddlewareRegistry::new().global_middleware().is_empty());
    }

    #[tokio::test]
    async fn test_panic_response_gets_every_header() {
        let handler: BoxedHandler = Box::new(|req| explode(req).boxed());

        let response = run(&MiddlewareRegistry::envelope(cors()), handler)
            .await
            .unwrap_err();

        assert_eq!(response.status_code(), 500);
        assert!(response.header_value(REQUEST_ID_HEADER).is_some());
        assert_eq!(response.header_value("Access-Control-Allow-Origin"), Some("*"));
        for (name, value) in SECURITY_HEADERS {
            assert_eq!(response.header_value(name), Some(value), "{}", name);
        }
    }
}
