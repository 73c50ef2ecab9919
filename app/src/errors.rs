//! Resolver error taxonomy
//!
//! Validation errors reach the caller word for word. Internal errors are
//! replaced by a fixed per-operation message plus the request id.

use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::validation::{MAX_TITLE_LENGTH, MIN_TITLE_LENGTH};

/// A caller-supplied argument broke a documented rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("ID must be a positive integer")]
    InvalidId,
    #[error("Title is required and must be a string")]
    TitleRequired,
    #[error("Title must be at least {} character(s)", MIN_TITLE_LENGTH)]
    TitleTooShort,
    #[error("Title must not exceed {} characters", MAX_TITLE_LENGTH)]
    TitleTooLong,
    #[error("No fields to update. Provide title and/or completed.")]
    NoFieldsToUpdate,
    #[error("Completed must be a boolean")]
    CompletedNotBoolean,
}

/// The five resolver operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListTodos,
    GetTodo,
    CreateTodo,
    UpdateTodo,
    DeleteTodo,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Self::ListTodos => "listTodos",
            Self::GetTodo => "getTodo",
            Self::CreateTodo => "createTodo",
            Self::UpdateTodo => "updateTodo",
            Self::DeleteTodo => "deleteTodo",
        }
    }

    /// What the caller sees when the operation fails internally
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::ListTodos => "Failed to fetch todos. Please try again later.",
            Self::GetTodo => "Failed to fetch todo. Please try again later.",
            Self::CreateTodo => "Failed to create todo. Please try again later.",
            Self::UpdateTodo => "Failed to update todo. Please try again later.",
            Self::DeleteTodo => "Failed to delete todo. Please try again later.",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Detail has already been logged; only the generic message remains
    #[error("{}", .operation.failure_message())]
    Internal {
        operation: Operation,
        request_id: String,
    },
}

impl TodoError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl ErrorExtensions for TodoError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
            if let Self::Internal { request_id, .. } = self {
                e.set("requestId", request_id.as_str());
            }
        })
    }
}
