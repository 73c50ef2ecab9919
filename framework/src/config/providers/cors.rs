use crate::config::env::env;

/// Cross-origin headers sent with every response
#[derive(Debug, Clone, PartialEq)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
    /// Preflight cache lifetime in seconds
    pub max_age: u32,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self {
            allow_origin: env("CORS_ALLOW_ORIGIN", "*".to_string()),
            allow_methods: env("CORS_ALLOW_METHODS", "POST, OPTIONS".to_string()),
            allow_headers: env(
                "CORS_ALLOW_HEADERS",
                "Content-Type, Authorization".to_string(),
            ),
            max_age: env("CORS_MAX_AGE", 86400),
        }
    }

    pub fn builder() -> CorsConfigBuilder {
        CorsConfigBuilder::default()
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[derive(Default)]
pub struct CorsConfigBuilder {
    allow_origin: Option<String>,
    allow_methods: Option<String>,
    allow_headers: Option<String>,
    max_age: Option<u32>,
}

impl CorsConfigBuilder {
    pub fn allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.allow_origin = Some(origin.into());
        self
    }

    pub fn allow_methods(mut self, methods: impl Into<String>) -> Self {
        self.allow_methods = Some(methods.into());
        self
    }

    pub fn allow_headers(mut self, headers: impl Into<String>) -> Self {
        self.allow_headers = Some(headers.into());
        self
    }

    pub fn max_age(mut self, seconds: u32) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn build(self) -> CorsConfig {
        let default = CorsConfig::from_env();
        CorsConfig {
            allow_origin: self.allow_origin.unwrap_or(default.allow_origin),
            allow_methods: self.allow_methods.unwrap_or(default.allow_methods),
            allow_headers: self.allow_headers.unwrap_or(default.allow_headers),
            max_age: self.max_age.unwrap_or(default.max_age),
        }
    }
}
