use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Web client configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the ranking backend, without a trailing slash.
    pub backend_url: String,
    pub port: u16,
    pub rust_log: String,
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
    pub cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let backend_url = std::env::var("BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        Ok(Config {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            port: parse_env("PORT", 3000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 120)?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            cookie_secure: parse_env("COOKIE_SECURE", false)?,
        })
    }

    /// Configuration used by unit tests; never reads the environment.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            backend_url: "http://backend.test".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            request_timeout: Duration::from_secs(5),
            max_upload_bytes: 1024 * 1024,
            cookie_secure: false,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let port: u16 = parse_env("WEB_TEST_UNSET_PORT_VARIABLE", 3000).unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("WEB_TEST_BAD_TIMEOUT", "soon");
        let parsed: Result<u64> = parse_env("WEB_TEST_BAD_TIMEOUT", 120);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parse_env_reads_bool() {
        std::env::set_var("WEB_TEST_COOKIE_SECURE", "true");
        let secure: bool = parse_env("WEB_TEST_COOKIE_SECURE", false).unwrap();
        assert!(secure);
    }
}
