use kit::{Config, DbConnection, HttpResponse, Router};
use std::sync::Arc;

use crate::config::GraphqlConfig;
use crate::controllers::graphql::{playground_html, GraphqlController};
use crate::controllers::health;
use crate::graphql::build_schema;
use crate::middleware::RequireDatabase;

/// Build the router
///
/// `db` is `None` when the database was unreachable at startup; GraphQL
/// requests then get 503 from `RequireDatabase`.
pub fn register(db: Option<DbConnection>) -> Router {
    let config = Config::get::<GraphqlConfig>().unwrap_or_default();
    routes(&config, db)
}

pub fn routes(config: &GraphqlConfig, db: Option<DbConnection>) -> Router {
    let graphql = Arc::new(GraphqlController::new(build_schema(config)));
    let health_db = db.clone();

    let router = Router::new()
        .post(&config.path, move |req| {
            let graphql = graphql.clone();
            async move { graphql.execute(req).await }
        })
        .middleware(RequireDatabase::new(db))
        .get("/health", move |_req| health::show(health_db.clone()));

    if !config.playground {
        return router.into();
    }

    let page = playground_html(&config.path);
    router
        .get(&config.path, move |_req| {
            let page = page.clone();
            async move { Ok(HttpResponse::html(page)) }
        })
        .into()
}
