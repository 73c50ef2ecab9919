//! Todo domain type and the row store behind it

use async_trait::async_trait;
use chrono::NaiveDateTime;
use kit::DbConnection;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, QueryOrder, QuerySelect};

use super::entities::todos::{self, Column, Entity};

/// Format of `createdAt` on the wire
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A todo as the rest of the application sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub completed: bool,
    pub created_at: NaiveDateTime,
}

impl Todo {
    pub fn created_at_string(&self) -> String {
        self.created_at.format(CREATED_AT_FORMAT).to_string()
    }
}

impl From<todos::Model> for Todo {
    fn from(row: todos::Model) -> Self {
        Self {
            id: row.id,
            title: row.title,
            completed: row.completed != 0,
            created_at: row.created_at,
        }
    }
}

/// Fields an update writes; `None` leaves the stored value alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Persistence for todos
///
/// Every method is a single statement. Inputs are already validated.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Newest first, at most `limit` rows
    async fn list(&self, limit: u64) -> Result<Vec<Todo>, DbErr>;

    async fn find(&self, id: i32) -> Result<Option<Todo>, DbErr>;

    /// Insert with `completed = false` and return the stored row
    async fn create(&self, title: &str) -> Result<Todo, DbErr>;

    /// `Ok(None)` when no row has `id`
    async fn update(&self, id: i32, changes: &TodoChanges) -> Result<Option<Todo>, DbErr>;

    /// `Ok(true)` iff a row was removed
    async fn delete(&self, id: i32) -> Result<bool, DbErr>;
}

/// `TodoStore` over a SeaORM connection
#[derive(Clone)]
pub struct SqlTodoStore {
    db: DbConnection,
}

impl SqlTodoStore {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoStore for SqlTodoStore {
    async fn list(&self, limit: u64) -> Result<Vec<Todo>, DbErr> {
        let rows = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(self.db.inner())
            .await?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Todo>, DbErr> {
        let row = Entity::find_by_id(id).one(self.db.inner()).await?;
        Ok(row.map(Todo::from))
    }

    async fn create(&self, title: &str) -> Result<Todo, DbErr> {
        let row = todos::ActiveModel {
            title: ActiveValue::Set(title.to_string()),
            completed: ActiveValue::Set(0),
            ..Default::default()
        };

        let inserted = Entity::insert(row)
            .exec_with_returning(self.db.inner())
            .await?;
        Ok(inserted.into())
    }

    async fn update(&self, id: i32, changes: &TodoChanges) -> Result<Option<Todo>, DbErr> {
        let mut row = todos::ActiveModel {
            id: ActiveValue::Unchanged(id),
            ..Default::default()
        };
        if let Some(title) = &changes.title {
            row.title = ActiveValue::Set(title.clone());
        }
        if let Some(completed) = changes.completed {
            row.completed = ActiveValue::Set(i32::from(completed));
        }

        match row.update(self.db.inner()).await {
            Ok(updated) => Ok(Some(updated.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = Entity::delete_by_id(id).exec(self.db.inner()).await?;
        Ok(result.rows_affected > 0)
    }
}
