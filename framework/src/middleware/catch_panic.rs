use super::{Middleware, Next, RequestId};
use crate::http::{HttpResponse, Request, Response};
use async_trait::async_trait;
use futures::future::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;

/// Converts a panic anywhere below it into the generic 500 response
///
/// The panic message is logged with the request id. The panic location and
/// backtrace come from the process panic hook, which runs at the panic site.
/// The client only sees
/// `{"error":"Internal server error","requestId":"<id>"}`. Place it after
/// the header middleware so the 500 still receives CORS and security headers.
pub struct CatchPanicMiddleware;

#[async_trait]
impl Middleware for CatchPanicMiddleware {
    async fn handle(&self, request: Request, next: Next) -> Response {
        let request_id = request
            .extension::<RequestId>()
            .cloned()
            .unwrap_or_else(RequestId::generate);

        match AssertUnwindSafe(next(request)).catch_unwind().await {
            Ok(response) => response,
            Err(payload) => {
                tracing::error!(
                    request_id = %request_id,
                    panic = %panic_message(payload.as_ref()),
                    "unhandled panic while serving request"
                );
                Err(HttpResponse::internal_error(request_id.as_str()))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
