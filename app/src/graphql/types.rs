use async_graphql::SimpleObject;

use crate::models;

/// Wire shape of a todo
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub completed: bool,
    /// `YYYY-MM-DD HH:MM:SS`, UTC
    pub created_at: String,
}

impl From<models::Todo> for Todo {
    fn from(todo: models::Todo) -> Self {
        Self {
            created_at: todo.created_at_string(),
            id: todo.id,
            title: todo.title,
            completed: todo.completed,
        }
    }
}
