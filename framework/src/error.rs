//! Framework-wide error types
//!
//! Provides a unified error type that can be used throughout the framework
//! and automatically converts to appropriate HTTP responses.

use thiserror::Error;

/// Framework-wide error type
///
/// This enum represents all possible errors that can occur in the framework.
/// It converts into an [`HttpResponse`](crate::http::HttpResponse) so errors can
/// be propagated using the `?` operator in controller handlers.
///
/// # Example
///
/// ```rust,ignore
/// use kit::{FrameworkError, Request, Response};
///
/// pub async fn execute(req: Request) -> Response {
///     let payload: Payload = req.json()?;  // 400 on malformed JSON
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Error)]
pub enum FrameworkError {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Generic internal server error
    #[error("Internal server error: {message}")]
    Internal {
        /// The error message
        message: String,
    },

    /// Configuration missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request body could not be read or decoded (400 Bad Request)
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The request body exceeded the configured limit (413 Payload Too Large)
    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge {
        /// Configured maximum body size in bytes
        limit: usize,
    },

    /// A required backing service is not available (503 Service Unavailable)
    #[error("Service temporarily unavailable")]
    ServiceUnavailable,
}

impl FrameworkError {
    /// Create a DatabaseError
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an InvalidBody error
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Database(_) => 500,
            Self::Internal { .. } => 500,
            Self::Config(_) => 500,
            Self::InvalidBody(_) => 400,
            Self::PayloadTooLarge { .. } => 413,
            Self::ServiceUnavailable => 503,
        }
    }

    /// Whether the message is safe to show to a client
    ///
    /// Server-side failures carry internal detail and are replaced by a
    /// generic message when rendered.
    pub fn is_client_facing(&self) -> bool {
        self.status_code() < 500 || matches!(self, Self::ServiceUnavailable)
    }
}

// Implement From<DbErr> for automatic error conversion with ?
impl From<sea_orm::DbErr> for FrameworkError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Database(e.to_string())
    }
}
