//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use super::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_DATABASE_NAME, DEFAULT_DATABASE_URL,
    DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_MAX_CONNECTIONS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MEMORY_DATABASE_SCHEME, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

static SCHEMA_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid schema name pattern"));

const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_name: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("database_name", &self.database_name)
            .field("max_connections", &self.max_connections)
            .field("connect_timeout", &self.connect_timeout)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Build a configuration with defaults for everything but the store URL
    /// and signing secret.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> AppResult<Self> {
        let config = Self {
            database_url: database_url.into(),
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            jwt_secret: jwt_secret.into(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables (and `.env`).
    ///
    /// Release builds refuse to start without `JWT_SECRET`.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        let database_name = env::var("DB_NAME")
            .or_else(|_| env::var("DATABASE_NAME"))
            .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string());

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            database_name,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            connect_timeout: Duration::from_secs(parse_var(
                "DATABASE_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?),
            jwt_secret,
            jwt_expiration_hours: parse_var("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS)?,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        if !SCHEMA_NAME.is_match(&self.database_name) {
            return Err(AppError::internal(format!(
                "Invalid database name '{}'",
                self.database_name
            )));
        }
        if self.jwt_expiration_hours <= 0 {
            return Err(AppError::internal("JWT_EXPIRATION_HOURS must be positive"));
        }
        Ok(())
    }

    /// Whether the in-memory document store was requested.
    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with(MEMORY_DATABASE_SCHEME)
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::internal(format!("{} has an invalid value: '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}
