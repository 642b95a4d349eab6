// ABOUTME: Environment-based configuration management for the server
// ABOUTME: Loads typed settings from environment variables with sane defaults
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 PetLodge

//! Environment configuration
//!
//! All runtime settings come from environment variables, with defaults
//! suitable for local development. Production deployments must supply
//! `JWT_SECRET` explicitly.

use crate::{
    auth::generate_jwt_secret,
    constants::{defaults, env_config, limits},
    errors::{AppError, AppResult},
};
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite { path: PathBuf },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from a connection string
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to the connection string sqlx expects
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_string(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DATABASE_URL)
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret for signing session tokens
    pub jwt_secret: Vec<u8>,
    /// Session token validity in hours
    pub token_expiry_hours: i64,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns `ConfigError` when a variable holds an unparseable value or
    /// when `JWT_SECRET` is absent in production
    pub fn from_env() -> AppResult<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let environment = Environment::from_str_or_default(
            &env_var_or(env_config::ENVIRONMENT, "development"),
        );

        let http_port = env_var_or(env_config::HTTP_PORT, &defaults::HTTP_PORT.to_string())
            .parse()
            .map_err(|e| AppError::config(format!("Invalid HTTP_PORT value: {e}")))?;

        let database_url =
            DatabaseUrl::parse_url(&env_var_or(env_config::DATABASE_URL, defaults::DATABASE_URL));

        let jwt_secret = Self::load_jwt_secret(environment)?;

        Ok(Self {
            http_port,
            log_level: LogLevel::from_str_or_default(&env_var_or("RUST_LOG", "info")),
            environment,
            database: DatabaseConfig { url: database_url },
            auth: AuthConfig {
                jwt_secret,
                token_expiry_hours: limits::SESSION_EXPIRY_HOURS,
            },
        })
    }

    /// Resolve the token-signing secret
    ///
    /// Production requires an explicit secret; elsewhere a random one is
    /// generated, which invalidates outstanding tokens on restart.
    fn load_jwt_secret(environment: Environment) -> AppResult<Vec<u8>> {
        if let Ok(secret) = env::var(env_config::JWT_SECRET) {
            if secret.is_empty() {
                return Err(AppError::config("JWT_SECRET must not be empty"));
            }
            return Ok(secret.into_bytes());
        }

        if environment.is_production() {
            return Err(AppError::config(
                "JWT_SECRET must be set in production",
            ));
        }

        warn!("JWT_SECRET not set; generating an ephemeral secret (sessions will not survive restarts)");
        let secret = generate_jwt_secret()
            .map_err(|e| AppError::config(format!("Failed to generate JWT secret: {e}")))?;
        Ok(secret.to_vec())
    }

    /// Human-readable configuration summary for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "PetLodge Server Configuration:\n\
             - HTTP Port: {}\n\
             - Log Level: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Session Expiry: {}h",
            self.http_port,
            self.log_level,
            self.environment,
            if self.database.url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            self.auth.token_expiry_hours,
        )
    }
}

/// Get environment variable with a default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
