//! Configuration module for the site backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::AppError;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional admin key guarding document writes
    pub admin_key: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Connection string overriding `db_path` (sqlite:, postgres:// or memory:)
    pub database_url: Option<String>,
    /// Directory holding the built single-page app
    pub static_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let admin_key = env::var("SITE_ADMIN_KEY").ok().filter(|k| !k.is_empty());

        let db_path = env::var("SITE_DB_PATH")
            .unwrap_or_else(|_| "./data/site.sqlite".to_string())
            .into();

        let database_url = env::var("SITE_DATABASE_URL").ok().filter(|u| !u.is_empty());

        let static_dir = env::var("SITE_STATIC_DIR")
            .unwrap_or_else(|_| "./dist".to_string())
            .into();

        let raw_addr = env::var("SITE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_addr = raw_addr.parse().map_err(|e| {
            AppError::Configuration(format!("Invalid SITE_BIND_ADDR {:?}: {}", raw_addr, e))
        })?;

        let log_level = env::var("SITE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("SITE_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            admin_key,
            db_path,
            database_url,
            static_dir,
            bind_addr,
            log_level,
            log_format,
        })
    }

    /// Human-readable storage target for boot logs. Only the scheme of a
    /// connection string is shown, never its credentials.
    pub fn storage_target(&self) -> String {
        match self.database_url.as_deref() {
            Some(url) => {
                let scheme = url.split(':').next().unwrap_or_default();
                format!("{} (SITE_DATABASE_URL)", scheme)
            }
            None => format!("sqlite file {}", self.db_path.display()),
        }
    }
}
