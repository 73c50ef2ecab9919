use crate::config::env::{env, env_bool};

/// Backend selected by the connection URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    Postgres,
    Sqlite,
}

impl DatabaseType {
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Self::Postgres)
        } else if url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else {
            None
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds
    pub connect_timeout: u64,
    /// Log every SQL statement through sqlx
    pub logging: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env("DATABASE_URL", "sqlite://./database/todos.db".to_string()),
            max_connections: env("DB_MAX_CONNECTIONS", 10),
            min_connections: env("DB_MIN_CONNECTIONS", 1),
            connect_timeout: env("DB_CONNECT_TIMEOUT", 30),
            logging: env_bool("DB_LOGGING", false),
        }
    }

    pub fn builder() -> DatabaseConfigBuilder {
        DatabaseConfigBuilder::default()
    }

    pub fn database_type(&self) -> Option<DatabaseType> {
        DatabaseType::from_url(&self.url)
    }

    /// True for `sqlite::memory:` style URLs
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[derive(Default)]
pub struct DatabaseConfigBuilder {
    url: Option<String>,
    max_connections: Option<u32>,
    min_connections: Option<u32>,
    connect_timeout: Option<u64>,
    logging: Option<bool>,
}

impl DatabaseConfigBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = Some(n);
        self
    }

    pub fn min_connections(mut self, n: u32) -> Self {
        self.min_connections = Some(n);
        self
    }

    pub fn connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout = Some(seconds);
        self
    }

    pub fn logging(mut self, enabled: bool) -> Self {
        self.logging = Some(enabled);
        self
    }

    pub fn build(self) -> DatabaseConfig {
        let default = DatabaseConfig::from_env();
        DatabaseConfig {
            url: self.url.unwrap_or(default.url),
            max_connections: self.max_connections.unwrap_or(default.max_connections),
            min_connections: self.min_connections.unwrap_or(default.min_connections),
            connect_timeout: self.connect_timeout.unwrap_or(default.connect_timeout),
            logging: self.logging.unwrap_or(default.logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_type_from_url() {
        assert_eq!(
            DatabaseType::from_url("postgres://u:p@localhost/todos"),
            Some(DatabaseType::Postgres)
        );
        assert_eq!(
            DatabaseType::from_url("sqlite::memory:"),
            Some(DatabaseType::Sqlite)
        );
        assert_eq!(DatabaseType::from_url("mysql://localhost"), None);
    }

    #[test]
    fn test_builder_overrides() {
        let config = DatabaseConfig::builder()
            .url("sqlite::memory:")
            .max_connections(1)
            .build();

        assert!(config.is_in_memory());
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.database_type(), Some(DatabaseType::Sqlite));
    }
}
