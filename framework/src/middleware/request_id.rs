//! Per-request correlation id and access logging

use super::{Middleware, Next};
use crate::http::{Request, Response, ResponseExt};
use async_trait::async_trait;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Response header echoing the correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Correlation id attached to a request as an extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Assigns a [`RequestId`], opens a tracing span carrying it, and logs the
/// request outcome with elapsed time.
///
/// Register it first so every later middleware and handler runs inside the span.
pub struct RequestIdMiddleware;

#[async_trait]
impl Middleware for RequestIdMiddleware {
    async fn handle(&self, mut request: Request, next: Next) -> Response {
        let id = RequestId::generate();
        let started = Instant::now();
        let span = tracing::info_span!(
            "request",
            request_id = %id,
            method = %request.method(),
            path = %request.path(),
        );
        request.insert_extension(id.clone());

        async move {
            tracing::debug!("request started");
            let response = next(request).await;

            let status = match &response {
                Ok(r) | Err(r) => r.status_code(),
            };
            tracing::info!(
                status,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "request completed"
            );

            response.with_headers(&[(REQUEST_ID_HEADER.to_string(), id.to_string())])
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use bytes::Bytes;
    use futures::future::FutureExt;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_generated_ids_are_unique() {
        let a = RequestId::generate();
        let b = RequestId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[tokio::test]
    async fn test_id_is_visible_to_handler_and_echoed() {
        let seen = Arc::new(Mutex::new(None));
        let seen_in_handler = seen.clone();
        let next: Next = Arc::new(move |req: Request| {
            let seen = seen_in_handler.clone();
            async move {
                *seen.lock().unwrap() = req.extension::<RequestId>().cloned();
                Ok(HttpResponse::text("ok"))
            }
            .boxed()
        });

        let response = RequestIdMiddleware
            .handle(http::Request::new(Bytes::new()).into(), next)
            .await
            .unwrap();

        let seen = seen.lock().unwrap().clone().expect("handler saw a request id");
        assert_eq!(response.header_value(REQUEST_ID_HEADER), Some(seen.as_str()));
    }

    #[tokio::test]
    async fn test_header_added_to_error_responses() {
        let next: Next =
            Arc::new(|_req| async { Err(HttpResponse::text("nope").status(503)) }.boxed());

        let response = RequestIdMiddleware
            .handle(http::Request::new(Bytes::new()).into(), next)
            .await
            .unwrap_err();

        assert_eq!(response.status_code(), 503);
        assert!(response.header_value(REQUEST_ID_HEADER).is_some());
    }
}
