//! Configuration module for the coaching backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:3000,http://localhost:5173,http://localhost:8080";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Maximum number of pooled database connections
    pub db_max_connections: u32,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    /// CORS allow-list
    pub allowed_origins: AllowedOrigins,
}

/// A configuration value that could not be parsed.
#[derive(Debug)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid value {:?} for {}", self.value, self.variable)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("COACHING_DB_PATH")
            .unwrap_or_else(|_| "./data/coaching.sqlite".to_string())
            .into();

        let db_max_connections = parse_var("COACHING_DB_MAX_CONNECTIONS", "5")?;
        let bind_addr = parse_var("COACHING_BIND_ADDR", "127.0.0.1:8080")?;

        let log_level = env::var("COACHING_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("COACHING_LOG_FORMAT") {
            Err(_) => LogFormat::Text,
            Ok(v) if v.eq_ignore_ascii_case("text") => LogFormat::Text,
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            Ok(v) => {
                return Err(ConfigError {
                    variable: "COACHING_LOG_FORMAT",
                    value: v,
                })
            }
        };

        let allowed_origins = parse_origins(
            &env::var("COACHING_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
        );

        Ok(Self {
            db_path,
            db_max_connections,
            bind_addr,
            log_level,
            log_format,
            allowed_origins,
        })
    }
}

fn parse_var<T: std::str::FromStr>(variable: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(variable).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|_| ConfigError { variable, value })
}

fn parse_origins(raw: &str) -> AllowedOrigins {
    if raw.trim() == "*" {
        return AllowedOrigins::Any;
    }
    AllowedOrigins::List(
        raw.split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect(),
    )
}
