//! Server configuration from command-line flags and `CIVIC_*` environment
//! variables.

use std::{net::SocketAddr, time::Duration};

use clap::{Parser, ValueEnum};

use crate::access::{
    domain::{AccessDomainError, AdminCredentials},
    services::{DEFAULT_SESSION_TTL_MINUTES, MAX_SESSION_TTL_MINUTES},
};
use crate::issue::adapters::DEFAULT_NOMINATIM_URL;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Settings for `civic_server`.
#[derive(Debug, Clone, Parser)]
#[command(name = "civic_server", version, about = "Civic issue reporting server")]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "CIVIC_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// `PostgreSQL` connection URL; issues are kept in memory when absent.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "CIVIC_DB_POOL_SIZE", default_value_t = 8)]
    pub db_pool_size: u32,

    /// Seed the in-memory store with demonstration issues.
    #[arg(long, env = "CIVIC_SEED_DEMO")]
    pub seed_demo: bool,

    /// Base URL of the Nominatim reverse geocoder.
    #[arg(long, env = "CIVIC_GEOCODER_URL", default_value = DEFAULT_NOMINATIM_URL)]
    pub geocoder_url: String,

    /// `User-Agent` sent to the geocoder.
    #[arg(
        long,
        env = "CIVIC_GEOCODER_USER_AGENT",
        default_value = concat!("civic-connect/", env!("CARGO_PKG_VERSION"))
    )]
    pub geocoder_user_agent: String,

    /// Geocoder request timeout in seconds.
    #[arg(long, env = "CIVIC_GEOCODER_TIMEOUT_SECS", default_value_t = 5)]
    pub geocoder_timeout_secs: u64,

    /// Email of the admin account.
    #[arg(long, env = "CIVIC_ADMIN_EMAIL", requires = "admin_password_sha256")]
    pub admin_email: Option<String>,

    /// Hex SHA-256 digest of the admin password.
    #[arg(long, env = "CIVIC_ADMIN_PASSWORD_SHA256", requires = "admin_email")]
    pub admin_password_sha256: Option<String>,

    /// Session lifetime in minutes, from one minute to one year.
    #[arg(
        long,
        env = "CIVIC_SESSION_TTL_MINUTES",
        default_value_t = DEFAULT_SESSION_TTL_MINUTES,
        value_parser = clap::value_parser!(i64).range(1..=MAX_SESSION_TTL_MINUTES)
    )]
    pub session_ttl_minutes: i64,

    /// Log output format.
    #[arg(long, env = "CIVIC_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Allow cross-origin requests from any origin.
    #[arg(long, env = "CIVIC_PERMISSIVE_CORS")]
    pub permissive_cors: bool,
}

impl ServerConfig {
    /// Returns the configured admin account, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDomainError`] when the email is blank or the digest
    /// is not 64 hex characters.
    pub fn admin_credentials(&self) -> Result<Option<AdminCredentials>, AccessDomainError> {
        match (&self.admin_email, &self.admin_password_sha256) {
            (Some(email), Some(digest)) => {
                AdminCredentials::from_sha256_hex(email, digest).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Returns the geocoder request timeout.
    #[must_use]
    pub const fn geocoder_timeout(&self) -> Duration {
        Duration::from_secs(self.geocoder_timeout_secs)
    }

    /// Returns the session lifetime, clamped to one minute through one year.
    #[must_use]
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES))
    }
}
