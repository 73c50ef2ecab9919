//! Configuration
//!
//! `.env` files are layered by environment, then each concern reads its own
//! typed struct from the process environment. Structs are stored in a global
//! repository keyed by type and fetched with [`Config::get`].
//!
//! ```rust,ignore
//! use kit::{Config, ServerConfig};
//!
//! Config::init(std::path::Path::new("."));
//! let server = Config::get::<ServerConfig>().unwrap_or_default();
//! ```

pub mod env;
pub mod providers;
pub mod repository;

pub use env::{env, env_bool, env_optional, load_dotenv, Environment};
pub use providers::{AppConfig, CorsConfig, CorsConfigBuilder, LogConfig, LogFormat, ServerConfig};

use std::any::Any;
use std::path::Path;

/// Facade over the global config repository
pub struct Config;

impl Config {
    /// Load `.env` files from `project_root` and register the built-in configs
    ///
    /// Returns the detected environment.
    pub fn init(project_root: &Path) -> Environment {
        let env = env::load_dotenv(project_root);

        repository::register(AppConfig::from_env());
        repository::register(ServerConfig::from_env());
        repository::register(CorsConfig::from_env());
        repository::register(LogConfig::from_env());

        env
    }

    /// Get a typed config struct
    pub fn get<T: Any + Send + Sync + Clone + 'static>() -> Option<T> {
        repository::get::<T>()
    }

    /// Register an application-defined config struct
    pub fn register<T: Any + Send + Sync + 'static>(config: T) {
        repository::register(config);
    }

    /// Debug mode; off unless `AppConfig` says otherwise
    pub fn is_debug() -> bool {
        Config::get::<AppConfig>().map(|c| c.debug).unwrap_or(false)
    }
}
