use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::database::config::DatabaseConfig;
use crate::error::FrameworkError;

/// Shared handle to the connection pool
///
/// Cheap to clone. Derefs to SeaORM's `DatabaseConnection`.
#[derive(Clone, Debug)]
pub struct DbConnection {
    inner: Arc<DatabaseConnection>,
}

impl DbConnection {
    /// Open a pool for `config`
    ///
    /// File-backed SQLite databases are created, along with their parent
    /// directory, if they don't exist yet.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, FrameworkError> {
        let url = sqlite_url(config)?;

        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .sqlx_logging(config.logging);

        let conn = Database::connect(opt).await?;
        tracing::info!(
            backend = %config.database_type().map(|t| t.to_string()).unwrap_or_default(),
            "database connected"
        );

        Ok(Self::from(conn))
    }

    pub fn inner(&self) -> &DatabaseConnection {
        &self.inner
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> Result<(), FrameworkError> {
        self.inner.ping().await.map_err(FrameworkError::from)
    }
}

fn sqlite_url(config: &DatabaseConfig) -> Result<String, FrameworkError> {
    let Some(path) = config.url.strip_prefix("sqlite://") else {
        return Ok(config.url.clone());
    };
    if config.is_in_memory() {
        return Ok(config.url.clone());
    }

    let (path, query) = match path.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path, None),
    };
    let path = path.trim_start_matches("./");
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FrameworkError::database(format!(
                    "cannot create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    // Create the file unless the URL already chose a mode
    Ok(format!("sqlite:{}?{}", path, query.unwrap_or("mode=rwc")))
}

impl From<DatabaseConnection> for DbConnection {
    fn from(conn: DatabaseConnection) -> Self {
        Self {
            inner: Arc::new(conn),
        }
    }
}

impl AsRef<DatabaseConnection> for DbConnection {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.inner
    }
}

impl std::ops::Deref for DbConnection {
    type Target = DatabaseConnection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
