//! Middleware support
//!
//! A middleware receives the request and a `Next` continuation. It may
//! short-circuit by returning a response without calling `next`, or call it
//! and decorate whatever comes back.
//!
//! # Example
//!
//! ```rust,ignore
//! use kit::{async_trait, Middleware, Next, Request, Response};
//!
//! pub struct TimingMiddleware;
//!
//! #[async_trait]
//! impl Middleware for TimingMiddleware {
//!     async fn handle(&self, request: Request, next: Next) -> Response {
//!         next(request).await
//!     }
//! }
//! ```

mod catch_panic;
mod cors;
mod registry;
mod request_id;
mod security_headers;

pub use catch_panic::CatchPanicMiddleware;
pub use cors::CorsMiddleware;
pub use registry::MiddlewareRegistry;
pub use request_id::{RequestId, RequestIdMiddleware, REQUEST_ID_HEADER};
pub use security_headers::{SecurityHeadersMiddleware, SECURITY_HEADERS};

use crate::http::{Request, Response};
use crate::routing::BoxedHandler;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;

/// Continuation passed to middleware; calling it runs the rest of the chain
pub type Next = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// Trait implemented by all middleware
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: Request, next: Next) -> Response;
}

/// Shared, type-erased middleware instance
pub type BoxedMiddleware = Arc<dyn Middleware>;

pub fn into_boxed<M: Middleware + 'static>(middleware: M) -> BoxedMiddleware {
    Arc::new(middleware)
}

/// Ordered list of middleware wrapped around a terminal handler
#[derive(Default)]
pub struct MiddlewareChain {
    middleware: Vec<BoxedMiddleware>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, middleware: impl IntoIterator<Item = BoxedMiddleware>) {
        self.middleware.extend(middleware);
    }

    /// Run the chain; the first middleware added is the outermost
    pub async fn execute(self, request: Request, handler: Arc<BoxedHandler>) -> Response {
        let mut next: Next = Arc::new(move |req| (*handler)(req));

        for middleware in self.middleware.into_iter().rev() {
            let inner = next.clone();
            next = Arc::new(move |req| {
                let middleware = middleware.clone();
                let inner = inner.clone();
                async move { middleware.handle(req, inner).await }.boxed()
            });
        }

        next(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use bytes::Bytes;
    use std::sync::Mutex;

    struct Tag(&'static str, Arc<Mutex<Vec<&'static str>>>);

    #[async_trait]
    impl Middleware for Tag {
        async fn handle(&self, request: Request, next: Next) -> Response {
            self.1.lock().unwrap().push(self.0);
            next(request).await
        }
    }

    struct ShortCircuit;

    #[async_trait]
    impl Middleware for ShortCircuit {
        async fn handle(&self, _request: Request, _next: Next) -> Response {
            Err(HttpResponse::text("stopped").status(418))
        }
    }

    fn handler() -> Arc<BoxedHandler> {
        let handler: BoxedHandler =
            Box::new(|_req| async { Ok(HttpResponse::text("handled")) }.boxed());
        Arc::new(handler)
    }

    fn request() -> Request {
        http::Request::new(Bytes::new()).into()
    }

    #[tokio::test]
    async fn test_chain_runs_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chain = MiddlewareChain::new();
        chain.extend([
            into_boxed(Tag("first", log.clone())),
            into_boxed(Tag("second", log.clone())),
        ]);

        let response = chain.execute(request(), handler()).await.unwrap();

        assert_eq!(response.body(), "handled");
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_short_circuit_skips_handler() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chain = MiddlewareChain::new();
        chain.extend([into_boxed(ShortCircuit), into_boxed(Tag("inner", log.clone()))]);

        let response = chain.execute(request(), handler()).await.unwrap_err();

        assert_eq!(response.status_code(), 418);
        assert!(log.lock().unwrap().is_empty());
    }
}
