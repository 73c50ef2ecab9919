use kit::{DbConnection, HttpResponse, Response};
use serde_json::json;

/// Liveness plus a database round trip
///
/// 200 `{"status":"ok"}` when the database answers, otherwise
/// 503 `{"status":"degraded"}`.
pub async fn show(db: Option<DbConnection>) -> Response {
    let healthy = match db {
        Some(db) => match db.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "database ping failed");
                false
            }
        },
        None => false,
    };

    if healthy {
        Ok(HttpResponse::json(json!({ "status": "ok" })))
    } else {
        Err(HttpResponse::json(json!({ "status": "degraded" })).status(503))
    }
}
