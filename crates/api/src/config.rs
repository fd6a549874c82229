//! Application configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use messaging::MessagingSettings;
use transaction_store::DatabaseSettings;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `json` for JSON logs, anything else for text
/// - `DATABASE_URL`, `DATABASE_NAME`, `TRANSACTIONS_COLLECTION`,
///   `SEED_IF_EMPTY`, `DEGRADE_ON_ERROR`, `DATABASE_CONNECT_TIMEOUT_SECS`
/// - `MESSAGING_CONNECTION_STRING`, `MESSAGING_QUEUE_NAME`,
///   `MESSAGING_ALLOW_LOOPBACK`
///
/// Unparsable values fall back to the default.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub database: DatabaseSettings,
    pub messaging: MessagingSettings,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);

        let database = DatabaseSettings {
            connection_string: text("DATABASE_URL", defaults.database.connection_string),
            database_name: text("DATABASE_NAME", defaults.database.database_name),
            collection_name: text("TRANSACTIONS_COLLECTION", defaults.database.collection_name),
            seed_if_empty: lookup("SEED_IF_EMPTY")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.database.seed_if_empty),
            degrade_on_error: lookup("DEGRADE_ON_ERROR")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.database.degrade_on_error),
            connect_timeout: lookup("DATABASE_CONNECT_TIMEOUT_SECS")
                .and_then(|v| parse_value(&v))
                .map(Duration::from_secs)
                .unwrap_or(defaults.database.connect_timeout),
            ..defaults.database
        };

        let messaging = MessagingSettings {
            connection_string: text(
                "MESSAGING_CONNECTION_STRING",
                defaults.messaging.connection_string,
            ),
            queue_name: text("MESSAGING_QUEUE_NAME", defaults.messaging.queue_name),
            allow_loopback: lookup("MESSAGING_ALLOW_LOOPBACK")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.messaging.allow_loopback),
            ..defaults.messaging
        };

        Self {
            host: text("HOST", defaults.host),
            port: lookup("PORT")
                .and_then(|v| parse_value(&v))
                .unwrap_or(defaults.port),
            log_level: text("RUST_LOG", defaults.log_level),
            log_format: match lookup("LOG_FORMAT") {
                Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
            database,
            messaging,
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            database: DatabaseSettings::default(),
            messaging: MessagingSettings::default(),
        }
    }
}

fn parse_value<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
