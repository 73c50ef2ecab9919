//! Todo actions
//!
//! One action per resolver. Each validates its arguments, issues a single
//! store call, and logs the outcome under the request's id.

use sea_orm::DbErr;
use std::sync::Arc;
use std::time::Instant;

use crate::errors::{Operation, TodoError, ValidationError};
use crate::models::{Todo, TodoChanges, TodoStore};
use crate::validation::{
    sanitize_title, sanitize_title_update, validate_completed_update, validate_id, FieldUpdate,
};

/// Upper bound on rows returned by `todos`
pub const MAX_LIST_ROWS: u64 = 1000;

/// Per-request capabilities handed to every action
#[derive(Clone)]
pub struct TodoContext {
    store: Arc<dyn TodoStore>,
    request_id: String,
}

impl TodoContext {
    pub fn new(store: Arc<dyn TodoStore>, request_id: impl Into<String>) -> Self {
        Self {
            store,
            request_id: request_id.into(),
        }
    }

    fn store(&self) -> &dyn TodoStore {
        self.store.as_ref()
    }

    /// Log the store failure in full and hand back the generic error
    fn internal(&self, operation: Operation, started: Instant, err: DbErr) -> TodoError {
        tracing::error!(
            operation = %operation,
            request_id = %self.request_id,
            elapsed_ms = elapsed_ms(started),
            error = %err,
            error_debug = ?err,
            "todo operation failed"
        );
        TodoError::Internal {
            operation,
            request_id: self.request_id.clone(),
        }
    }
}

fn rejected(operation: Operation, err: ValidationError) -> TodoError {
    tracing::debug!(operation = %operation, reason = %err, "invalid arguments");
    err.into()
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

pub struct ListTodosAction<'a> {
    ctx: &'a TodoContext,
}

impl<'a> ListTodosAction<'a> {
    pub fn new(ctx: &'a TodoContext) -> Self {
        Self { ctx }
    }

    pub async fn execute(&self) -> Result<Vec<Todo>, TodoError> {
        let started = Instant::now();
        let op = Operation::ListTodos;

        let todos = self
            .ctx
            .store()
            .list(MAX_LIST_ROWS)
            .await
            .map_err(|e| self.ctx.internal(op, started, e))?;

        tracing::info!(
            operation = %op,
            count = todos.len(),
            elapsed_ms = elapsed_ms(started),
            "todos listed"
        );
        Ok(todos)
    }
}

pub struct GetTodoAction<'a> {
    ctx: &'a TodoContext,
}

impl<'a> GetTodoAction<'a> {
    pub fn new(ctx: &'a TodoContext) -> Self {
        Self { ctx }
    }

    /// `Ok(None)` when no todo has `id`
    pub async fn execute(&self, id: i32) -> Result<Option<Todo>, TodoError> {
        let started = Instant::now();
        let op = Operation::GetTodo;
        let id = validate_id(id).map_err(|e| rejected(op, e))?;

        let todo = self
            .ctx
            .store()
            .find(id)
            .await
            .map_err(|e| self.ctx.internal(op, started, e))?;

        tracing::info!(
            operation = %op,
            todo_id = id,
            found = todo.is_some(),
            elapsed_ms = elapsed_ms(started),
            "todo fetched"
        );
        Ok(todo)
    }
}

pub struct CreateTodoAction<'a> {
    ctx: &'a TodoContext,
}

impl<'a> CreateTodoAction<'a> {
    pub fn new(ctx: &'a TodoContext) -> Self {
        Self { ctx }
    }

    pub async fn execute(&self, title: &str) -> Result<Todo, TodoError> {
        let started = Instant::now();
        let op = Operation::CreateTodo;
        let title = sanitize_title(title).map_err(|e| rejected(op, e))?;

        let todo = self
            .ctx
            .store()
            .create(&title)
            .await
            .map_err(|e| self.ctx.internal(op, started, e))?;

        tracing::info!(
            operation = %op,
            todo_id = todo.id,
            elapsed_ms = elapsed_ms(started),
            "todo created"
        );
        Ok(todo)
    }
}

pub struct UpdateTodoAction<'a> {
    ctx: &'a TodoContext,
}

impl<'a> UpdateTodoAction<'a> {
    pub fn new(ctx: &'a TodoContext) -> Self {
        Self { ctx }
    }

    /// Checks run in order: id, at least one field, title, completed
    pub async fn execute(
        &self,
        id: i32,
        title: FieldUpdate<String>,
        completed: FieldUpdate<bool>,
    ) -> Result<Option<Todo>, TodoError> {
        let started = Instant::now();
        let op = Operation::UpdateTodo;
        let changes = Self::changes(id, title, completed).map_err(|e| rejected(op, e))?;

        let todo = self
            .ctx
            .store()
            .update(id, &changes)
            .await
            .map_err(|e| self.ctx.internal(op, started, e))?;

        tracing::info!(
            operation = %op,
            todo_id = id,
            found = todo.is_some(),
            elapsed_ms = elapsed_ms(started),
            "todo updated"
        );
        Ok(todo)
    }

    fn changes(
        id: i32,
        title: FieldUpdate<String>,
        completed: FieldUpdate<bool>,
    ) -> Result<TodoChanges, ValidationError> {
        validate_id(id)?;
        if title.is_omitted() && completed.is_omitted() {
            return Err(ValidationError::NoFieldsToUpdate);
        }

        Ok(TodoChanges {
            title: sanitize_title_update(title)?,
            completed: validate_completed_update(completed)?,
        })
    }
}

pub struct DeleteTodoAction<'a> {
    ctx: &'a TodoContext,
}

impl<'a> DeleteTodoAction<'a> {
    pub fn new(ctx: &'a TodoContext) -> Self {
        Self { ctx }
    }

    /// `Ok(false)` when nothing matched `id`
    pub async fn execute(&self, id: i32) -> Result<bool, TodoError> {
        let started = Instant::now();
        let op = Operation::DeleteTodo;
        let id = validate_id(id).map_err(|e| rejected(op, e))?;

        let deleted = self
            .ctx
            .store()
            .delete(id)
            .await
            .map_err(|e| self.ctx.internal(op, started, e))?;

        tracing::info!(
            operation = %op,
            todo_id = id,
            deleted,
            elapsed_ms = elapsed_ms(started),
            "todo deleted"
        );
        Ok(deleted)
    }
}
