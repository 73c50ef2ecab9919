mod graphql;

pub use graphql::GraphqlConfig;

use kit::{Config, DatabaseConfig};

/// Register all application configs
pub fn register_all() {
    Config::register(DatabaseConfig::from_env());
    Config::register(GraphqlConfig::from_env());
}
