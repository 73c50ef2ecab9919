use crate::config::{AppConfig, Config, ServerConfig};
use crate::error::FrameworkError;
use crate::http::{collect_body, HttpResponse, Request, ResponseExt};
use crate::middleware::{MiddlewareChain, MiddlewareRegistry};
use crate::routing::{BoxedHandler, Router};
use bytes::Bytes;
use futures::future::FutureExt;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Request pipeline without a socket
///
/// Global middleware wraps routing, so unmatched paths and preflight
/// requests still pass through it. Tests drive this directly.
#[derive(Clone)]
pub struct Kernel {
    router: Arc<Router>,
    middleware: MiddlewareRegistry,
}

impl Kernel {
    pub fn new(router: impl Into<Router>, middleware: MiddlewareRegistry) -> Self {
        Self {
            router: Arc::new(router.into()),
            middleware,
        }
    }

    /// Run a request through global middleware and the router
    pub async fn handle(&self, request: Request) -> HttpResponse {
        let router = self.router.clone();
        let handler: BoxedHandler = Box::new(move |req| {
            let router = router.clone();
            async move { router.dispatch(req).await }.boxed()
        });
        self.run(request, handler).await
    }

    /// Answer with `error` while still applying global middleware
    ///
    /// Used when the body could not be read, so the rejection carries the
    /// same headers as any other response.
    pub async fn reject(&self, request: Request, error: FrameworkError) -> HttpResponse {
        let response = HttpResponse::from(error);
        let handler: BoxedHandler = Box::new(move |_req| {
            let response = response.clone();
            async move { Err(response) }.boxed()
        });
        self.run(request, handler).await
    }

    async fn run(&self, request: Request, handler: BoxedHandler) -> HttpResponse {
        let mut chain = MiddlewareChain::new();
        chain.extend(self.middleware.global_middleware().iter().cloned());
        chain.execute(request, Arc::new(handler)).await.into_inner()
    }
}

/// HTTP listener driving a [`Kernel`]
pub struct Server {
    kernel: Kernel,
    config: ServerConfig,
}

impl Server {
    /// Listen with the registered `ServerConfig`
    pub fn from_config(router: impl Into<Router>, middleware: MiddlewareRegistry) -> Self {
        Self {
            kernel: Kernel::new(router, middleware),
            config: Config::get::<ServerConfig>().unwrap_or_else(ServerConfig::from_env),
        }
    }

    /// Accept connections until Ctrl-C
    pub async fn run(self) -> Result<(), FrameworkError> {
        let addr = self.config.address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| FrameworkError::config(format!("cannot bind {}: {}", addr, e)))?;

        let app = Config::get::<AppConfig>().unwrap_or_default();
        tracing::info!(
            app = %app.name,
            environment = %app.environment,
            address = %addr,
            "server listening"
        );

        let kernel = Arc::new(self.kernel);
        let max_body_size = self.config.max_body_size;

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            let (stream, peer) = tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                },
                _ = &mut shutdown => {
                    tracing::info!("shutdown signal received");
                    return Ok(());
                }
            };

            let io = TokioIo::new(stream);
            let kernel = kernel.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                    let kernel = kernel.clone();
                    async move {
                        Ok::<_, Infallible>(handle_request(&kernel, req, max_body_size).await)
                    }
                });

                if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::debug!(peer = %peer, error = %e, "connection closed with error");
                }
            });
        }
    }
}

async fn handle_request(
    kernel: &Kernel,
    req: hyper::Request<hyper::body::Incoming>,
    max_body_size: usize,
) -> hyper::Response<Full<Bytes>> {
    let (parts, body) = req.into_parts();

    let response = match collect_body(body, max_body_size).await {
        Ok(bytes) => kernel.handle(Request::new(parts, bytes)).await,
        Err(e) => kernel.reject(Request::new(parts, Bytes::new()), e).await,
    };

    response.into_hyper()
}
