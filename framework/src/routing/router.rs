use crate::http::{HttpResponse, Request, Response};
use crate::middleware::{into_boxed, BoxedMiddleware, Middleware, MiddlewareChain};
use futures::future::{BoxFuture, FutureExt};
use matchit::Router as MatchitRouter;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// HTTP method a route is registered under
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Method {
    Get,
    Post,
}

impl Method {
    fn from_http(method: &http::Method) -> Option<Self> {
        match *method {
            http::Method::GET => Some(Self::Get),
            http::Method::POST => Some(Self::Post),
            _ => None,
        }
    }
}

/// Type alias for route handlers
pub type BoxedHandler = Box<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// HTTP Router
///
/// Route-level middleware is keyed by method and path, so a GET and a POST on
/// the same path can carry different middleware.
pub struct Router {
    get_routes: MatchitRouter<Arc<BoxedHandler>>,
    post_routes: MatchitRouter<Arc<BoxedHandler>>,
    route_middleware: HashMap<(Method, String), Vec<BoxedMiddleware>>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            get_routes: MatchitRouter::new(),
            post_routes: MatchitRouter::new(),
            route_middleware: HashMap::new(),
        }
    }

    fn boxed<H, Fut>(handler: H) -> Arc<BoxedHandler>
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let handler: BoxedHandler = Box::new(move |req| handler(req).boxed());
        Arc::new(handler)
    }

    /// Register a GET route
    pub fn get<H, Fut>(mut self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        if let Err(e) = self.get_routes.insert(path, Self::boxed(handler)) {
            tracing::warn!(path, error = %e, "GET route not registered");
        }
        RouteBuilder {
            router: self,
            last: (Method::Get, path.to_string()),
        }
    }

    /// Register a POST route
    pub fn post<H, Fut>(mut self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        if let Err(e) = self.post_routes.insert(path, Self::boxed(handler)) {
            tracing::warn!(path, error = %e, "POST route not registered");
        }
        RouteBuilder {
            router: self,
            last: (Method::Post, path.to_string()),
        }
    }

    /// Match a request and return the handler with the route's middleware
    fn match_route(
        &self,
        method: &http::Method,
        path: &str,
    ) -> Option<(Arc<BoxedHandler>, Vec<BoxedMiddleware>)> {
        let method = Method::from_http(method)?;
        let routes = match method {
            Method::Get => &self.get_routes,
            Method::Post => &self.post_routes,
        };

        let matched = routes.at(path).ok()?;
        let middleware = self
            .route_middleware
            .get(&(method, path.to_string()))
            .cloned()
            .unwrap_or_default();
        Some((matched.value.clone(), middleware))
    }

    /// Route a request through its middleware to its handler
    ///
    /// Unknown paths produce 404; a known path with an unsupported method
    /// produces 405.
    pub async fn dispatch(&self, request: Request) -> Response {
        match self.match_route(request.method(), request.path()) {
            Some((handler, middleware)) => {
                let mut chain = MiddlewareChain::new();
                chain.extend(middleware);
                chain.execute(request, handler).await
            }
            None if self.path_exists(request.path()) => Err(HttpResponse::json(
                serde_json::json!({ "error": "Method not allowed" }),
            )
            .status(405)),
            None => Err(HttpResponse::json(serde_json::json!({ "error": "Not found" })).status(404)),
        }
    }

    fn path_exists(&self, path: &str) -> bool {
        self.get_routes.at(path).is_ok() || self.post_routes.at(path).is_ok()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder returned after registering a route, enabling `.middleware()` chaining
pub struct RouteBuilder {
    router: Router,
    last: (Method, String),
}

impl RouteBuilder {
    /// Apply middleware to the most recently registered route
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// Router::new()
    ///     .post("/graphql", graphql::execute).middleware(RequireDatabase::new(db))
    ///     .get("/health", health::show)
    /// ```
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> RouteBuilder {
        self.router
            .route_middleware
            .entry(self.last.clone())
            .or_default()
            .push(into_boxed(middleware));
        self
    }

    /// Register a GET route (for chaining)
    pub fn get<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.get(path, handler)
    }

    /// Register a POST route (for chaining)
    pub fn post<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.post(path, handler)
    }
}

impl From<RouteBuilder> for Router {
    fn from(builder: RouteBuilder) -> Self {
        builder.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::Next;
    use async_trait::async_trait;
    use bytes::Bytes;

    async fn hello(_req: Request) -> Response {
        Ok(HttpResponse::text("hello"))
    }

    async fn create(_req: Request) -> Response {
        Ok(HttpResponse::text("created").status(201))
    }

    struct Deny;

    #[async_trait]
    impl Middleware for Deny {
        async fn handle(&self, _request: Request, _next: Next) -> Response {
            Err(HttpResponse::text("denied").status(403))
        }
    }

    fn request(method: &str, path: &str) -> Request {
        http::Request::builder()
            .method(method)
            .uri(path)
            .body(Bytes::new())
            .unwrap()
            .into()
    }

    fn router() -> Router {
        Router::new()
            .get("/items", hello)
            .post("/items", create)
            .middleware(Deny)
            .into()
    }

    #[tokio::test]
    async fn test_dispatch_by_method() {
        let router = router();

        let response = router.dispatch(request("GET", "/items")).await.unwrap();
        assert_eq!(response.body(), "hello");
    }

    #[tokio::test]
    async fn test_route_middleware_is_method_scoped() {
        let router = router();

        let response = router.dispatch(request("POST", "/items")).await.unwrap_err();
        assert_eq!(response.status_code(), 403);

        let response = router.dispatch(request("GET", "/items")).await.unwrap();
        assert_eq!(response.status_code(), 200);
    }

    #[tokio::test]
    async fn test_not_found_and_method_not_allowed() {
        let router = router();

        let response = router.dispatch(request("GET", "/missing")).await.unwrap_err();
        assert_eq!(response.status_code(), 404);

        let response = router.dispatch(request("DELETE", "/items")).await.unwrap_err();
        assert_eq!(response.status_code(), 405);
    }
}
