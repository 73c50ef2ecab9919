use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, MaybeUndefined, Object, Result, Schema,
};

use super::types::Todo;
use crate::actions::{
    CreateTodoAction, DeleteTodoAction, GetTodoAction, ListTodosAction, TodoContext,
    UpdateTodoAction,
};
use crate::config::GraphqlConfig;
use crate::validation::FieldUpdate;

pub type TodoSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema with the configured query limits
///
/// Each request must attach a [`TodoContext`] as request data.
pub fn build_schema(config: &GraphqlConfig) -> TodoSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .limit_depth(config.max_depth)
        .limit_complexity(config.max_complexity)
        .finish()
}

/// Schema in SDL form
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

impl<T> From<MaybeUndefined<T>> for FieldUpdate<T> {
    fn from(value: MaybeUndefined<T>) -> Self {
        match value {
            MaybeUndefined::Undefined => FieldUpdate::Omitted,
            MaybeUndefined::Null => FieldUpdate::Null,
            MaybeUndefined::Value(v) => FieldUpdate::Set(v),
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All todos, newest first (at most 1000)
    async fn todos(&self, ctx: &Context<'_>) -> Result<Vec<Todo>> {
        let todo_ctx = ctx.data::<TodoContext>()?;
        let todos = ListTodosAction::new(todo_ctx)
            .execute()
            .await
            .map_err(|e| e.extend())?;
        Ok(todos.into_iter().map(Todo::from).collect())
    }

    /// A single todo, or null when no todo has this id
    async fn todo(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Todo>> {
        let todo_ctx = ctx.data::<TodoContext>()?;
        let todo = GetTodoAction::new(todo_ctx)
            .execute(id)
            .await
            .map_err(|e| e.extend())?;
        Ok(todo.map(Todo::from))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_todo(&self, ctx: &Context<'_>, title: String) -> Result<Todo> {
        let todo_ctx = ctx.data::<TodoContext>()?;
        let todo = CreateTodoAction::new(todo_ctx)
            .execute(&title)
            .await
            .map_err(|e| e.extend())?;
        Ok(todo.into())
    }

    /// Changes only the fields supplied; null when no todo has this id
    async fn update_todo(
        &self,
        ctx: &Context<'_>,
        id: i32,
        title: MaybeUndefined<String>,
        completed: MaybeUndefined<bool>,
    ) -> Result<Option<Todo>> {
        let todo_ctx = ctx.data::<TodoContext>()?;
        let todo = UpdateTodoAction::new(todo_ctx)
            .execute(id, title.into(), completed.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(todo.map(Todo::from))
    }

    /// True when a todo was removed
    async fn delete_todo(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let todo_ctx = ctx.data::<TodoContext>()?;
        DeleteTodoAction::new(todo_ctx)
            .execute(id)
            .await
            .map_err(|e| e.extend())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::todo_action::tests::FailingStore;
    use crate::migrations::Migrator;
    use crate::models::SqlTodoStore;
    use kit::expect;
    use kit::testing::TestDatabase;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn config() -> GraphqlConfig {
        GraphqlConfig {
            path: "/graphql".to_string(),
            playground: false,
            max_depth: 15,
            max_complexity: 200,
        }
    }

    struct Harness {
        _db: TestDatabase,
        schema: TodoSchema,
        ctx: TodoContext,
    }

    impl Harness {
        async fn new() -> Self {
            let db = TestDatabase::fresh::<Migrator>().await.unwrap();
            let store = Arc::new(SqlTodoStore::new(db.conn().clone()));
            Self {
                _db: db,
                schema: build_schema(&config()),
                ctx: TodoContext::new(store, "req-graphql"),
            }
        }

        async fn run(&self, query: &str) -> async_graphql::Response {
            let request = async_graphql::Request::new(query).data(self.ctx.clone());
            self.schema.execute(request).await
        }

        async fn data(&self, query: &str) -> Value {
            let response = self.run(query).await;
            assert!(response.errors.is_empty(), "{:?}", response.errors);
            response.data.into_json().unwrap()
        }
    }

    fn first_error(response: &async_graphql::Response) -> (String, Value) {
        let error = &response.errors[0];
        let extensions = serde_json::to_value(&error.extensions).unwrap();
        (error.message.clone(), extensions)
    }

    #[tokio::test]
    async fn test_create_todo_trims_title() {
        let harness = Harness::new().await;

        let data = harness
            .data(r#"mutation { createTodo(title: "  Buy milk  ") { id title completed createdAt } }"#)
            .await;

        let todo = &data["createTodo"];
        assert_eq!(todo["title"], json!("Buy milk"));
        assert_eq!(todo["completed"], json!(false));
        expect!(todo["id"].as_i64().unwrap() >= 1).to_be_true();
        expect!(todo["createdAt"].as_str().unwrap().len()).to_equal(19);
    }

    #[tokio::test]
    async fn test_todos_lists_newest_first() {
        let harness = Harness::new().await;
        for title in ["first", "second", "third"] {
            harness
                .data(&format!(r#"mutation {{ createTodo(title: "{}") {{ id }} }}"#, title))
                .await;
        }

        let data = harness.data("{ todos { title } }").await;

        assert_eq!(
            data["todos"],
            json!([{ "title": "third" }, { "title": "second" }, { "title": "first" }])
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_flow() {
        let harness = Harness::new().await;
        let created = harness
            .data(r#"mutation { createTodo(title: "Read book") { id title createdAt } }"#)
            .await;
        let id = created["createTodo"]["id"].as_i64().unwrap();

        let updated = harness
            .data(&format!(
                "mutation {{ updateTodo(id: {}, completed: true) {{ id title completed createdAt }} }}",
                id
            ))
            .await;
        assert_eq!(
            updated["updateTodo"],
            json!({
                "id": id,
                "title": "Read book",
                "completed": true,
                "createdAt": created["createTodo"]["createdAt"],
            })
        );

        let delete = format!("mutation {{ deleteTodo(id: {}) }}", id);
        assert_eq!(harness.data(&delete).await, json!({ "deleteTodo": true }));
        assert_eq!(harness.data(&delete).await, json!({ "deleteTodo": false }));

        let fetched = harness.data(&format!("{{ todo(id: {}) {{ id }} }}", id)).await;
        assert_eq!(fetched, json!({ "todo": null }));
    }

    #[tokio::test]
    async fn test_validation_errors_pass_through() {
        let harness = Harness::new().await;

        let response = harness.run("{ todo(id: 0) { id } }").await;
        let (message, extensions) = first_error(&response);
        assert_eq!(message, "ID must be a positive integer");
        assert_eq!(extensions["code"], json!("VALIDATION_ERROR"));

        let response = harness.run("mutation { updateTodo(id: 1) { id } }").await;
        assert_eq!(
            first_error(&response).0,
            "No fields to update. Provide title and/or completed."
        );

        let response = harness
            .run("mutation { updateTodo(id: 1, title: null) { id } }")
            .await;
        assert_eq!(first_error(&response).0, "Title is required and must be a string");

        let response = harness
            .run("mutation { updateTodo(id: 1, completed: null) { id } }")
            .await;
        assert_eq!(first_error(&response).0, "Completed must be a boolean");

        let response = harness.run(r#"mutation { createTodo(title: "   ") { id } }"#).await;
        assert_eq!(first_error(&response).0, "Title must be at least 1 character(s)");
    }

    #[tokio::test]
    async fn test_store_failure_is_generic() {
        let schema = build_schema(&config());
        let ctx = TodoContext::new(Arc::new(FailingStore::default()), "req-42");

        let response = schema
            .execute(async_graphql::Request::new("{ todos { id } }").data(ctx))
            .await;

        let (message, extensions) = first_error(&response);
        assert_eq!(message, "Failed to fetch todos. Please try again later.");
        assert_eq!(extensions["code"], json!("INTERNAL_ERROR"));
        assert_eq!(extensions["requestId"], json!("req-42"));
        expect!(serde_json::to_string(&response).unwrap().contains("10.0.0.5")).to_be_false();
    }

    #[tokio::test]
    async fn test_complexity_limit() {
        let db = TestDatabase::fresh::<Migrator>().await.unwrap();
        let schema = build_schema(&GraphqlConfig {
            max_complexity: 3,
            ..config()
        });
        let ctx = TodoContext::new(Arc::new(SqlTodoStore::new(db.conn().clone())), "req-c");

        let response = schema
            .execute(
                async_graphql::Request::new("{ todos { id title completed createdAt } }")
                    .data(ctx),
            )
            .await;

        expect!(response.errors.is_empty()).to_be_false();
    }

    #[test]
    fn test_sdl_exposes_operations() {
        let sdl = schema_sdl();

        for expected in [
            "todos: [Todo!]!",
            "todo(id: Int!): Todo",
            "createTodo(title: String!): Todo!",
            "updateTodo(id: Int!, title: String, completed: Boolean): Todo",
            "deleteTodo(id: Int!): Boolean!",
            "createdAt: String!",
        ] {
            expect!(sdl.contains(expected)).to_be_true();
        }
    }
}
