//! Configuration module for environment variable parsing.
//!
//! Configuration is read once at startup and shared read-only with every
//! handler through [`crate::web::AppState`]. Secrets are optional at load
//! time: a missing secret only fails the requests that need it.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

/// Default base URL of the Telegram bot API.
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Default outbound call timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 20_000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Telegram bot token used to build the bot API URL
    pub telegram_bot_token: Option<String>,

    /// Shared secret expected in the `X-API-Key` header on protected routes
    pub api_secret: Option<String>,

    /// Base URL of the Telegram bot API (overridable for staging/mocks)
    pub telegram_api_base: String,

    /// Outbound HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            telegram_bot_token: None,
            api_secret: None,
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            port: parse_or("PORT", defaults.port),

            telegram_bot_token: non_blank("TELEGRAM_BOT_TOKEN"),

            api_secret: non_blank("API_SECRET"),

            telegram_api_base: parse_api_base("TELEGRAM_API_BASE", defaults.telegram_api_base),

            request_timeout_ms: parse_nonzero("REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
        }
    }

    /// Address the web server binds to (all interfaces).
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Outbound request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Read a variable, treating empty or whitespace-only values as unset.
fn non_blank(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a variable, falling back to `default` when unset or invalid.
fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    let raw = match non_blank(name) {
        Some(v) => v,
        None => return default,
    };

    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}

/// Like [`parse_or`], but zero also counts as invalid.
fn parse_nonzero(name: &str, default: u64) -> u64 {
    match parse_or(name, default) {
        0 => {
            warn!(env_var = name, value = 0, "Invalid value, using default");
            default
        }
        value => value,
    }
}

/// Read a base URL, dropping trailing slashes so paths can be appended.
fn parse_api_base(name: &str, default: String) -> String {
    non_blank(name)
        .map(|base| base.trim_end_matches('/').to_string())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_valid() {
        env::set_var("TEST_RELAY_PARSE_VALID", "9090");
        let result: u16 = parse_or("TEST_RELAY_PARSE_VALID", 1);
        assert_eq!(result, 9090);
        env::remove_var("TEST_RELAY_PARSE_VALID");
    }

    #[test]
    fn test_parse_or_invalid_falls_back() {
        env::set_var("TEST_RELAY_PARSE_INVALID", "not-a-port");
        let result: u16 = parse_or("TEST_RELAY_PARSE_INVALID", 8080);
        assert_eq!(result, 8080);
        env::remove_var("TEST_RELAY_PARSE_INVALID");
    }

    #[test]
    fn test_parse_or_default() {
        let result: u64 = parse_or("NONEXISTENT_RELAY_VAR", 20_000);
        assert_eq!(result, 20_000);
    }

    #[test]
    fn test_non_blank_treats_whitespace_as_unset() {
        env::set_var("TEST_RELAY_BLANK", "   ");
        assert_eq!(non_blank("TEST_RELAY_BLANK"), None);
        env::set_var("TEST_RELAY_BLANK", " secret ");
        assert_eq!(non_blank("TEST_RELAY_BLANK"), Some("secret".to_string()));
        env::remove_var("TEST_RELAY_BLANK");
    }

    #[test]
    fn test_parse_api_base_trims_trailing_slashes() {
        env::set_var("TEST_RELAY_API_BASE", "http://localhost:8081//");
        assert_eq!(
            parse_api_base("TEST_RELAY_API_BASE", DEFAULT_TELEGRAM_API_BASE.to_string()),
            "http://localhost:8081"
        );
        env::remove_var("TEST_RELAY_API_BASE");

        assert_eq!(
            parse_api_base("TEST_RELAY_API_BASE", DEFAULT_TELEGRAM_API_BASE.to_string()),
            DEFAULT_TELEGRAM_API_BASE
        );
    }

    #[test]
    fn test_parse_nonzero_rejects_zero_timeout() {
        env::set_var("TEST_RELAY_TIMEOUT_ZERO", "0");
        assert_eq!(
            parse_nonzero("TEST_RELAY_TIMEOUT_ZERO", DEFAULT_REQUEST_TIMEOUT_MS),
            DEFAULT_REQUEST_TIMEOUT_MS
        );
        env::set_var("TEST_RELAY_TIMEOUT_ZERO", "1500");
        assert_eq!(
            parse_nonzero("TEST_RELAY_TIMEOUT_ZERO", DEFAULT_REQUEST_TIMEOUT_MS),
            1500
        );
        env::remove_var("TEST_RELAY_TIMEOUT_ZERO");
    }

    #[test]
    fn test_listen_addr_binds_all_interfaces() {
        let config = Config {
            port: 9000,
            ..Config::default()
        };
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:9000");
    }

    #[test]
    fn test_default_timeout_is_twenty_seconds() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
        assert!(config.api_secret.is_none());
        assert!(config.telegram_bot_token.is_none());
    }
}
