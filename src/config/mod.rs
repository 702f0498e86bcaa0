//! Configuration module for the fleet admin console.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every API request path is appended to
    pub api_base_url: String,
    /// Base URL stored image paths are appended to
    pub image_base_url: String,
    /// File holding the persisted access token
    pub session_path: PathBuf,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("FLEET_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let image_base_url =
            env::var("FLEET_IMAGE_BASE_URL").unwrap_or_else(|_| origin_of(&api_base_url));

        let session_path = env::var("FLEET_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_path());

        let request_timeout = match env::var("FLEET_TIMEOUT_SECS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    eprintln!("Ignoring invalid FLEET_TIMEOUT_SECS value: {raw}");
                    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
                }
            },
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let log_level = env::var("FLEET_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        let log_format = match env::var("FLEET_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            api_base_url,
            image_base_url,
            session_path,
            request_timeout,
            log_level,
            log_format,
        }
    }
}

/// Scheme and authority of a URL, without its path.
fn origin_of(url: &str) -> String {
    let after_scheme = url.find("://").map(|i| i + 3).unwrap_or(0);
    match url[after_scheme..].find('/') {
        Some(slash) => url[..after_scheme + slash].to_string(),
        None => url.to_string(),
    }
}

fn default_session_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fleet-admin")
        .join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("FLEET_API_BASE_URL");
        env::remove_var("FLEET_IMAGE_BASE_URL");
        env::remove_var("FLEET_SESSION_PATH");
        env::remove_var("FLEET_TIMEOUT_SECS");
        env::remove_var("FLEET_LOG_LEVEL");
        env::remove_var("FLEET_LOG_FORMAT");

        let config = Config::from_env();

        assert_eq!(config.api_base_url, "http://127.0.0.1:5000/api/v1");
        assert_eq!(config.image_base_url, "http://127.0.0.1:5000");
        assert!(config.session_path.ends_with("fleet-admin/session.json"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_origin_of() {
        assert_eq!(origin_of("https://api.example.com/v1"), "https://api.example.com");
        assert_eq!(origin_of("http://localhost:5000"), "http://localhost:5000");
    }
}
