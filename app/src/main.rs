mod actions;
mod bootstrap;
mod config;
mod controllers;
mod errors;
mod graphql;
mod middleware;
mod migrations;
mod models;
mod routes;
mod validation;


use kit::Application;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let result = Application::new()
        .config(config::register_all)
        .bootstrap(bootstrap::register)
        .routes(routes::register)
        .schema_printer(graphql::schema_sdl)
        .migrations::<migrations::Migrator>()
        .run()
        .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "todo-api exited with an error");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
