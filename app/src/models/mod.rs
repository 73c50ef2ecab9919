pub mod entities;
pub mod todos;

pub use todos::{SqlTodoStore, Todo, TodoChanges, TodoStore};
