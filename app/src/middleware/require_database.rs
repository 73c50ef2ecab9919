use kit::{async_trait, DbConnection, FrameworkError, HttpResponse, Middleware, Next, Request, Response};

/// Rejects the request with 503 when there is no database connection
///
/// Otherwise hands the connection to the handler as a request extension.
pub struct RequireDatabase {
    db: Option<DbConnection>,
}

impl RequireDatabase {
    pub fn new(db: Option<DbConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Middleware for RequireDatabase {
    async fn handle(&self, mut request: Request, next: Next) -> Response {
        let Some(db) = &self.db else {
            tracing::warn!("no database connection; request rejected");
            return Err(HttpResponse::from(FrameworkError::ServiceUnavailable));
        };

        request.insert_extension(db.clone());
        next(request).await
    }
}
