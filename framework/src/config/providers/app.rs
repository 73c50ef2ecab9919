use crate::config::env::{env, env_bool, Environment};

/// Application identity and mode
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: String,
    pub environment: Environment,
    /// Defaults to on for local and development environments
    pub debug: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = Environment::detect();
        Self {
            name: env("APP_NAME", "todo-api".to_string()),
            debug: env_bool("APP_DEBUG", environment.is_development()),
            environment,
        }
    }

}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
