use super::body::parse_json;
use crate::error::FrameworkError;
use bytes::Bytes;
use serde::de::DeserializeOwned;

/// HTTP Request wrapper with the body already collected
///
/// The server reads the body (bounded by `SERVER_MAX_BODY_SIZE`) before
/// handing the request to middleware, so handlers can parse it without
/// consuming the request. Middleware communicates with handlers through
/// typed extensions.
pub struct Request {
    parts: http::request::Parts,
    body: Bytes,
}

impl Request {
    pub fn new(parts: http::request::Parts, body: Bytes) -> Self {
        Self { parts, body }
    }

    /// Get the request method
    pub fn method(&self) -> &http::Method {
        &self.parts.method
    }

    /// Get the request path
    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    /// Parse the request body as JSON
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// #[derive(Deserialize)]
    /// struct GraphqlPayload { query: String }
    ///
    /// pub async fn execute(req: Request) -> Response {
    ///     let payload: GraphqlPayload = req.json()?;
    ///     // ...
    /// }
    /// ```
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        parse_json(&self.body)
    }

    /// Get a typed value placed on the request by middleware
    pub fn extension<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.parts.extensions.get::<T>()
    }

    /// Attach a typed value for later middleware and the handler
    pub fn insert_extension<T: Clone + Send + Sync + 'static>(&mut self, value: T) {
        self.parts.extensions.insert(value);
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        Self::new(parts, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let req: Request = http::Request::builder()
            .method("POST")
            .uri("/graphql?x=1")
            .header("Content-Type", "application/json")
            .body(Bytes::from_static(b"{}"))
            .unwrap()
            .into();

        assert_eq!(req.method(), http::Method::POST);
        assert_eq!(req.path(), "/graphql");
        let body: serde_json::Value = req.json().unwrap();
        assert_eq!(body, serde_json::json!({}));
    }

    #[test]
    fn test_extensions() {
        #[derive(Clone, Debug, PartialEq)]
        struct Marker(u8);

        let mut req: Request = http::Request::new(Bytes::new()).into();
        assert!(req.extension::<Marker>().is_none());

        req.insert_extension(Marker(7));
        assert_eq!(req.extension::<Marker>(), Some(&Marker(7)));
    }
}
