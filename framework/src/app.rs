//! Application builder and command line
//!
//! ```rust,ignore
//! Application::new()
//!     .config(config::register_all)
//!     .bootstrap(bootstrap::register)
//!     .routes(routes::register)
//!     .schema_printer(graphql::schema_sdl)
//!     .migrations::<migrations::Migrator>()
//!     .run()
//!     .await
//! ```

use crate::config::{Config, LogConfig};
use crate::database::{DbConnection, DB};
use crate::error::FrameworkError;
use crate::logging;
use crate::middleware::MiddlewareRegistry;
use crate::routing::Router;
use crate::server::Server;
use clap::{Parser, Subcommand};
use sea_orm_migration::{MigrationTrait, MigratorTrait};
use std::marker::PhantomData;
use std::path::Path;

#[derive(Parser)]
#[command(about = "Todo GraphQL service and maintenance commands")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Skip running migrations on startup
        #[arg(long)]
        no_migrate: bool,
    },
    /// Run pending database migrations
    Migrate,
    /// Show migration status
    #[command(name = "migrate:status")]
    MigrateStatus,
    /// Roll back the last migration(s)
    #[command(name = "migrate:rollback")]
    MigrateRollback {
        #[arg(default_value = "1")]
        steps: u32,
    },
    /// Drop all tables and re-run every migration
    #[command(name = "migrate:fresh")]
    MigrateFresh,
    /// Print the GraphQL schema in SDL form
    #[command(name = "schema:print")]
    SchemaPrint,
}

type ConfigFn = Box<dyn FnOnce()>;
type BootstrapFn = Box<dyn FnOnce() -> MiddlewareRegistry + Send>;
type RoutesFn = Box<dyn FnOnce(Option<DbConnection>) -> Router + Send>;
type SchemaFn = Box<dyn FnOnce() -> String + Send>;

/// Fluent builder wiring configuration, bootstrap, routes and migrations
pub struct Application<M = NoMigrator>
where
    M: MigratorTrait,
{
    config_fn: Option<ConfigFn>,
    bootstrap_fn: Option<BootstrapFn>,
    routes_fn: Option<RoutesFn>,
    schema_fn: Option<SchemaFn>,
    _migrator: PhantomData<M>,
}

/// Migrator with no migrations
pub struct NoMigrator;

impl MigratorTrait for NoMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![]
    }
}

impl Application<NoMigrator> {
    pub fn new() -> Self {
        Application {
            config_fn: None,
            bootstrap_fn: None,
            routes_fn: None,
            schema_fn: None,
            _migrator: PhantomData,
        }
    }
}

impl Default for Application<NoMigrator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Application<M>
where
    M: MigratorTrait,
{
    /// Register application config structs; runs right after `.env` loading
    pub fn config<F>(mut self, f: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        self.config_fn = Some(Box::new(f));
        self
    }

    /// Build the global middleware; runs after config registration
    pub fn bootstrap<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> MiddlewareRegistry + Send + 'static,
    {
        self.bootstrap_fn = Some(Box::new(f));
        self
    }

    /// Build the router
    ///
    /// Receives the connection, or `None` when the database could not be
    /// reached at startup.
    pub fn routes<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Option<DbConnection>) -> Router + Send + 'static,
    {
        self.routes_fn = Some(Box::new(f));
        self
    }

    /// Source for `schema:print`
    pub fn schema_printer<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String + Send + 'static,
    {
        self.schema_fn = Some(Box::new(f));
        self
    }

    pub fn migrations<NewM>(self) -> Application<NewM>
    where
        NewM: MigratorTrait,
    {
        Application {
            config_fn: self.config_fn,
            bootstrap_fn: self.bootstrap_fn,
            routes_fn: self.routes_fn,
            schema_fn: self.schema_fn,
            _migrator: PhantomData,
        }
    }

    /// Parse the command line and run the selected command
    pub async fn run(self) -> Result<(), FrameworkError> {
        let cli = Cli::parse();

        Config::init(Path::new("."));

        let Application {
            config_fn,
            bootstrap_fn,
            routes_fn,
            schema_fn,
            _migrator,
        } = self;

        if let Some(config_fn) = config_fn {
            config_fn();
        }

        let command = cli.command.unwrap_or(Commands::Serve { no_migrate: false });

        // schema:print writes to stdout; keep it free of log lines
        if command == Commands::SchemaPrint {
            let schema_fn = schema_fn
                .ok_or_else(|| FrameworkError::config("no GraphQL schema registered"))?;
            println!("{}", schema_fn());
            return Ok(());
        }

        logging::init(&Config::get::<LogConfig>().unwrap_or_default())?;

        match command {
            Commands::Serve { no_migrate } => {
                Self::serve(bootstrap_fn, routes_fn, !no_migrate).await
            }
            Commands::Migrate => {
                let db = DB::connect().await?;
                M::up(db.inner(), None).await?;
                tracing::info!("migrations completed");
                Ok(())
            }
            Commands::MigrateStatus => {
                let db = DB::connect().await?;
                M::status(db.inner()).await?;
                Ok(())
            }
            Commands::MigrateRollback { steps } => {
                let db = DB::connect().await?;
                M::down(db.inner(), Some(steps)).await?;
                tracing::info!(steps, "rollback completed");
                Ok(())
            }
            Commands::MigrateFresh => {
                tracing::warn!("dropping all tables and re-running migrations");
                let db = DB::connect().await?;
                M::fresh(db.inner()).await?;
                tracing::info!("database refreshed");
                Ok(())
            }
            Commands::SchemaPrint => Ok(()),
        }
    }

    async fn serve(
        bootstrap_fn: Option<BootstrapFn>,
        routes_fn: Option<RoutesFn>,
        migrate: bool,
    ) -> Result<(), FrameworkError> {
        let middleware = bootstrap_fn.map(|f| f()).unwrap_or_default();

        let db = match DB::connect().await {
            Ok(db) => {
                if migrate {
                    if let Err(e) = M::up(db.inner(), None).await {
                        tracing::error!(error = %e, "migration failed");
                    }
                }
                Some(db)
            }
            Err(e) => {
                tracing::error!(error = %e, "database unavailable; GraphQL requests will get 503");
                None
            }
        };

        let router = match routes_fn {
            Some(routes_fn) => routes_fn(db),
            None => Router::new(),
        };

        Server::from_config(router, middleware).run().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["todo-api"]).unwrap();
        assert_eq!(cli.command, None);

        let cli = Cli::try_parse_from(["todo-api", "serve", "--no-migrate"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Serve { no_migrate: true }));

        let cli = Cli::try_parse_from(["todo-api", "migrate:rollback", "3"]).unwrap();
        assert_eq!(cli.command, Some(Commands::MigrateRollback { steps: 3 }));

        let cli = Cli::try_parse_from(["todo-api", "schema:print"]).unwrap();
        assert_eq!(cli.command, Some(Commands::SchemaPrint));
    }
}
