use crate::error::FrameworkError;
use bytes::Bytes;
use http_body_util::Full;

/// HTTP Response builder
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    body: String,
    headers: Vec<(String, String)>,
}

/// Response type alias - allows using `?` operator for early returns
pub type Response = Result<HttpResponse, HttpResponse>;

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            status: 200,
            body: String::new(),
            headers: Vec::new(),
        }
    }

    /// Create a response with a string body
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
        }
    }

    /// Create a response with an HTML body
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            headers: vec![(
                "Content-Type".to_string(),
                "text/html; charset=utf-8".to_string(),
            )],
        }
    }

    /// Create a JSON response from a serde_json::Value
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }

    /// The generic 500 body returned when a request fails unexpectedly
    pub fn internal_error(request_id: &str) -> Self {
        Self::json(serde_json::json!({
            "error": "Internal server error",
            "requestId": request_id
        }))
        .status(500)
    }

    /// Set the HTTP status code
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Add a header to the response
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set a header, replacing any existing value with the same name
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Look up a header value (case-insensitive)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Convert to hyper response
    ///
    /// Invalid status codes fall back to 500 and unrepresentable header
    /// names or values are skipped.
    pub fn into_hyper(self) -> hyper::Response<Full<Bytes>> {
        let mut response = hyper::Response::new(Full::new(Bytes::from(self.body)));
        *response.status_mut() = hyper::StatusCode::from_u16(self.status)
            .unwrap_or(hyper::StatusCode::INTERNAL_SERVER_ERROR);

        let headers = response.headers_mut();
        for (name, value) in self.headers {
            if let (Ok(name), Ok(value)) = (
                hyper::header::HeaderName::from_bytes(name.as_bytes()),
                hyper::header::HeaderValue::from_str(&value),
            ) {
                headers.append(name, value);
            }
        }

        response
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Extension trait for Response
///
/// Middleware decorates successful and error responses alike, so these
/// helpers operate on both arms of the `Result`.
pub trait ResponseExt {
    /// Set headers on the response regardless of outcome
    fn with_headers(self, headers: &[(String, String)]) -> Self;

    /// Collapse to the HttpResponse carried by either arm
    fn into_inner(self) -> HttpResponse;
}

impl ResponseExt for Response {
    fn with_headers(self, headers: &[(String, String)]) -> Self {
        let apply = |mut response: HttpResponse| {
            for (name, value) in headers {
                response.set_header(name, value.clone());
            }
            response
        };
        match self {
            Ok(response) => Ok(apply(response)),
            Err(response) => Err(apply(response)),
        }
    }

    fn into_inner(self) -> HttpResponse {
        self.unwrap_or_else(|e| e)
    }
}

/// Auto-convert FrameworkError to HttpResponse
///
/// This enables using the `?` operator in controller handlers to propagate
/// framework errors as appropriate HTTP responses. Server-side failures are
/// rendered with a generic message; the detail stays in the logs.
impl From<FrameworkError> for HttpResponse {
    fn from(err: FrameworkError) -> HttpResponse {
        let status = err.status_code();
        let message = if err.is_client_facing() {
            err.to_string()
        } else {
            tracing::error!(error = %err, "request failed");
            "Internal server error".to_string()
        };
        HttpResponse::json(serde_json::json!({ "error": message })).status(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_header_replaces() {
        let mut response = HttpResponse::text("ok").header("X-Frame-Options", "SAMEORIGIN");
        response.set_header("x-frame-options", "DENY");

        assert_eq!(response.header_value("X-Frame-Options"), Some("DENY"));
        assert_eq!(
            response
                .into_hyper()
                .headers()
                .get_all("x-frame-options")
                .iter()
                .count(),
            1
        );
    }

    #[test]
    fn test_with_headers_applies_to_both_arms() {
        let headers = vec![("X-Test".to_string(), "1".to_string())];

        let ok: Response = Ok(HttpResponse::text("fine"));
        let err: Response = Err(HttpResponse::text("bad").status(400));

        assert_eq!(ok.with_headers(&headers).into_inner().header_value("X-Test"), Some("1"));
        let err = err.with_headers(&headers).into_inner();
        assert_eq!(err.header_value("X-Test"), Some("1"));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_internal_error_body() {
        let response = HttpResponse::internal_error("abc-123");
        assert_eq!(response.status_code(), 500);
        let body: serde_json::Value = serde_json::from_str(response.body()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"error": "Internal server error", "requestId": "abc-123"})
        );
    }

    #[test]
    fn test_framework_error_hides_internal_detail() {
        let response: HttpResponse = FrameworkError::database("password=hunter2").into();
        assert_eq!(response.status_code(), 500);
        assert!(!response.body().contains("hunter2"));

        let response: HttpResponse = FrameworkError::ServiceUnavailable.into();
        assert_eq!(response.status_code(), 503);
        assert_eq!(response.body(), r#"{"error":"Service temporarily unavailable"}"#);
    }
}
