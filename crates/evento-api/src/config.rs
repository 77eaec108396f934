// Service configuration loaded from environment variables.
// Decision: Defaults reproduce the original local setup (MySQL on localhost:3307, schema `evento`)
// Decision: DATABASE_URL, when set, wins over the individual DB_* variables

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use chrono_tz::Tz;
use evento_core::{parse_timezone, DEFAULT_DISPLAY_TIMEZONE};
use sqlx::mysql::MySqlConnectOptions;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";

/// Database connection settings
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 3307,
            user: "root".to_string(),
            password: "root".to_string(),
            name: "evento".to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(3),
        }
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<MySqlConnectOptions> {
        match &self.url {
            Some(url) => MySqlConnectOptions::from_str(url).context("Invalid DATABASE_URL"),
            None => Ok(MySqlConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.name)),
        }
    }
}

// Credentials stay out of logs
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

/// Complete service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Zone that listed events are converted to
    pub display_timezone: Tz,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<HeaderValue>,
    /// Run against the in-memory store instead of MySQL
    pub in_memory: bool,
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = DatabaseConfig::default();

        let bind_addr = var("EVENTO_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("Invalid EVENTO_BIND_ADDR")?;

        let timezone_name =
            var("EVENTO_DISPLAY_TIMEZONE").unwrap_or_else(|| DEFAULT_DISPLAY_TIMEZONE.to_string());
        let display_timezone =
            parse_timezone(&timezone_name).context("Invalid EVENTO_DISPLAY_TIMEZONE")?;

        let cors_origins: Vec<HeaderValue> = var("CORS_ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .filter_map(|s| s.trim().parse().ok())
                    .collect()
            })
            .unwrap_or_default();

        let in_memory = var("EVENTO_IN_MEMORY")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let database = DatabaseConfig {
            url: var("DATABASE_URL"),
            host: var("DB_HOST").unwrap_or(defaults.host),
            port: parse_or(var("DB_PORT"), defaults.port, "DB_PORT")?,
            user: var("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            name: var("DB_NAME").unwrap_or(defaults.name),
            max_connections: parse_or(
                var("DB_MAX_CONNECTIONS"),
                defaults.max_connections,
                "DB_MAX_CONNECTIONS",
            )?,
            acquire_timeout: Duration::from_secs(parse_or(
                var("DB_ACQUIRE_TIMEOUT_SECS"),
                defaults.acquire_timeout.as_secs(),
                "DB_ACQUIRE_TIMEOUT_SECS",
            )?),
        };

        Ok(Self {
            bind_addr,
            display_timezone,
            cors_origins,
            in_memory,
            database,
        })
    }
}

fn parse_or<T>(value: Option<String>, default: T, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(v) => v
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {}", key, v)),
        None => Ok(default),
    }
}
