use kit::config::{env, env_bool};
use kit::Config;

/// GraphQL endpoint settings
#[derive(Debug, Clone)]
pub struct GraphqlConfig {
    /// Path serving POST queries (and GraphiQL on GET when enabled)
    pub path: String,
    /// Serve GraphiQL; defaults to the application's debug mode
    pub playground: bool,
    pub max_depth: usize,
    pub max_complexity: usize,
}

impl GraphqlConfig {
    pub fn from_env() -> Self {
        Self {
            path: env("GRAPHQL_PATH", "/graphql".to_string()),
            playground: env_bool("GRAPHQL_PLAYGROUND", Config::is_debug()),
            max_depth: env("GRAPHQL_MAX_DEPTH", 15),
            max_complexity: env("GRAPHQL_MAX_COMPLEXITY", 200),
        }
    }
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
