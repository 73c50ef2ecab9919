//! HTTP, configuration and persistence plumbing for the todo GraphQL service

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routing;
pub mod server;
pub mod testing;

pub use app::Application;
pub use config::{AppConfig, Config, CorsConfig, Environment, LogConfig, LogFormat, ServerConfig};
pub use database::{DatabaseConfig, DbConnection, DB};
pub use error::FrameworkError;
pub use http::{HttpResponse, Request, Response, ResponseExt};
pub use middleware::{
    CatchPanicMiddleware, CorsMiddleware, Middleware, MiddlewareRegistry, Next, RequestId,
    RequestIdMiddleware, SecurityHeadersMiddleware, REQUEST_ID_HEADER,
};
pub use routing::Router;
pub use server::{Kernel, Server};

pub use async_trait::async_trait;
pub use sea_orm;
pub use serde_json;
