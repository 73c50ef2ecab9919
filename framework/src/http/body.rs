//! Body parsing utilities for HTTP requests
//!
//! Provides async body collection with a size limit and JSON parsing.

use crate::error::FrameworkError;
use bytes::Bytes;
use http_body_util::{BodyExt, Limited};
use hyper::body::Incoming;
use serde::de::DeserializeOwned;

/// Collect the full body from an Incoming stream, rejecting bodies over `limit` bytes
pub async fn collect_body(body: Incoming, limit: usize) -> Result<Bytes, FrameworkError> {
    Limited::new(body, limit)
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| {
            if e.is::<http_body_util::LengthLimitError>() {
                FrameworkError::PayloadTooLarge { limit }
            } else {
                FrameworkError::invalid_body(format!("Failed to read request body: {}", e))
            }
        })
}

/// Parse bytes as JSON into the target type
pub fn parse_json<T: DeserializeOwned>(bytes: &Bytes) -> Result<T, FrameworkError> {
    serde_json::from_slice(bytes)
        .map_err(|e| FrameworkError::invalid_body(format!("Failed to parse JSON body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        query: String,
    }

    #[test]
    fn test_parse_json() {
        let bytes = Bytes::from_static(br#"{"query":"{ todos { id } }"}"#);
        let payload: Payload = parse_json(&bytes).unwrap();
        assert_eq!(payload.query, "{ todos { id } }");
    }

    #[test]
    fn test_parse_json_rejects_garbage() {
        let bytes = Bytes::from_static(b"not json");
        let err = parse_json::<Payload>(&bytes).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
