use std::path::Path;

/// Deployment environment taken from `APP_ENV`
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Local,
    Development,
    Staging,
    Production,
    Testing,
    Custom(String),
}

impl Environment {
    /// Detect from `APP_ENV`, defaulting to `Local`
    pub fn detect() -> Self {
        Self::parse(std::env::var("APP_ENV").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("production") | Some("prod") => Self::Production,
            Some("staging") => Self::Staging,
            Some("development") | Some("dev") => Self::Development,
            Some("testing") | Some("test") => Self::Testing,
            Some("local") | Some("") | None => Self::Local,
            Some(other) => Self::Custom(other.to_string()),
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Local | Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Development => write!(f, "development"),
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
            Self::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Load `.env` files with environment-specific precedence
///
/// Later entries win:
/// 1. `.env`
/// 2. `.env.local`
/// 3. `.env.{environment}`
/// 4. `.env.{environment}.local`
/// 5. variables already set in the process
///
/// dotenvy never overwrites a variable that is already set, so files are
/// loaded most specific first.
pub fn load_dotenv(project_root: &Path) -> Environment {
    let env = Environment::detect();
    let suffix = env.to_string();

    let files = [
        format!(".env.{}.local", suffix),
        format!(".env.{}", suffix),
        ".env.local".to_string(),
        ".env".to_string(),
    ];
    for file in files {
        let path = project_root.join(&file);
        if dotenvy::from_path(&path).is_ok() {
            tracing::debug!(file = %path.display(), "loaded env file");
        }
    }

    env
}

/// Read and parse a variable, falling back to `default` when unset or invalid
pub fn env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_optional(key).unwrap_or(default)
}

/// Read and parse a variable if it is set and valid
pub fn env_optional<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Read a boolean flag; accepts `true/false`, `1/0`, `yes/no`, `on/off`
pub fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => parse_bool(&value).unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_environment() {
        assert_eq!(Environment::parse(None), Environment::Local);
        assert_eq!(Environment::parse(Some("prod")), Environment::Production);
        assert_eq!(
            Environment::parse(Some("qa")),
            Environment::Custom("qa".to_string())
        );
        assert!(Environment::parse(Some("dev")).is_development());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_env_falls_back_on_invalid_value() {
        std::env::set_var("KIT_TEST_ENV_PORT", "not-a-number");
        assert_eq!(env("KIT_TEST_ENV_PORT", 8080u16), 8080);
        std::env::set_var("KIT_TEST_ENV_PORT", " 9000 ");
        assert_eq!(env("KIT_TEST_ENV_PORT", 8080u16), 9000);
        std::env::remove_var("KIT_TEST_ENV_PORT");
    }
}
