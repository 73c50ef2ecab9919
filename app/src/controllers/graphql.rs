use async_graphql::http::GraphiQLSource;
use kit::{DbConnection, FrameworkError, HttpResponse, Request, RequestId, Response};
use serde::Serialize;
use std::sync::Arc;

use crate::actions::TodoContext;
use crate::graphql::TodoSchema;
use crate::models::SqlTodoStore;

/// Executes GraphQL operations posted to the endpoint
pub struct GraphqlController {
    schema: TodoSchema,
}

impl GraphqlController {
    pub fn new(schema: TodoSchema) -> Self {
        Self { schema }
    }

    /// Expects the `DbConnection` extension placed by `RequireDatabase`
    pub async fn execute(&self, req: Request) -> Response {
        let db = req
            .extension::<DbConnection>()
            .cloned()
            .ok_or(FrameworkError::ServiceUnavailable)?;
        let request_id = req
            .extension::<RequestId>()
            .cloned()
            .unwrap_or_else(RequestId::generate);

        let operation: async_graphql::Request = req.json()?;
        let ctx = TodoContext::new(Arc::new(SqlTodoStore::new(db)), request_id.as_str());

        let response = self.schema.execute(operation.data(ctx)).await;
        encode(&response, &request_id)
    }
}

/// JSON body for `value`; an encoding failure becomes the generic 500
fn encode<T: Serialize>(value: &T, request_id: &RequestId) -> Response {
    match serde_json::to_value(value) {
        Ok(body) => Ok(HttpResponse::json(body)),
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "cannot encode GraphQL response");
            Err(HttpResponse::internal_error(request_id.as_str()))
        }
    }
}

/// GraphiQL page pointed at `endpoint`
pub fn playground_html(endpoint: &str) -> String {
    GraphiQLSource::build().endpoint(endpoint).finish()
}
