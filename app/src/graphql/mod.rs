//! GraphQL surface over the todo actions

mod schema;
mod types;

pub use schema::{build_schema, schema_sdl, TodoSchema};
