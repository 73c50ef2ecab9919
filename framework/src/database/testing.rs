use sea_orm_migration::MigratorTrait;
use std::ops::Deref;

use super::{DatabaseConfig, DbConnection};
use crate::error::FrameworkError;

/// Private in-memory SQLite database with all migrations applied
///
/// Each instance is isolated; the pool holds a single connection so the
/// in-memory database lives exactly as long as the `TestDatabase`.
///
/// ```rust,ignore
/// let db = TestDatabase::fresh::<Migrator>().await?;
/// let store = SqlTodoStore::new(db.conn().clone());
/// ```
pub struct TestDatabase {
    conn: DbConnection,
}

impl TestDatabase {
    pub async fn fresh<M: MigratorTrait>() -> Result<Self, FrameworkError> {
        let config = DatabaseConfig::builder()
            .url("sqlite::memory:")
            .max_connections(1)
            .min_connections(1)
            .logging(false)
            .build();

        let conn = DbConnection::connect(&config).await?;
        M::up(conn.inner(), None).await?;

        Ok(Self { conn })
    }

    pub fn conn(&self) -> &DbConnection {
        &self.conn
    }
}

impl Deref for TestDatabase {
    type Target = DbConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}
