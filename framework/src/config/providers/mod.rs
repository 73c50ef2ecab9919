mod app;
mod cors;
mod log;
mod server;

pub use app::AppConfig;
pub use cors::{CorsConfig, CorsConfigBuilder};
pub use log::{LogConfig, LogFormat};
pub use server::ServerConfig;
