pub mod todo_action;

pub use todo_action::{
    CreateTodoAction, DeleteTodoAction, GetTodoAction, ListTodosAction, TodoContext,
    UpdateTodoAction,
};
