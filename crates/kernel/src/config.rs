//! Configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};

use crate::catalog::DEFAULT_PAGE_SIZE;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Products per page when a request names no `pageSize` (default: 12).
    pub default_page_size: u64,

    /// Upper bound on one catalog request's queries (default: 10s).
    pub query_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let default_page_size: u64 = env::var("DEFAULT_PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
            .parse()
            .context("DEFAULT_PAGE_SIZE must be a valid u64")?;
        if default_page_size == 0 {
            bail!("DEFAULT_PAGE_SIZE must be at least 1");
        }

        let query_timeout_secs: u64 = env::var("QUERY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("QUERY_TIMEOUT_SECS must be a valid u64")?;

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            default_page_size,
            query_timeout: Duration::from_secs(query_timeout_secs),
        })
    }
}
