//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::catalog::CatalogService;
use crate::config::Config;
use crate::db;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool.
    db: PgPool,

    /// Catalog query service.
    catalog: Arc<CatalogService>,

    /// Page size applied when a request names none.
    default_page_size: u64,
}

impl AppState {
    /// Create new application state with database connections.
    pub async fn new(config: &Config) -> Result<Self> {
        // Create PostgreSQL pool
        let db = db::create_pool(config)
            .await
            .context("failed to create database pool")?;

        // Run migrations
        db::run_migrations(&db)
            .await
            .context("failed to run migrations")?;

        info!(
            max_connections = config.database_max_connections,
            "database ready"
        );

        Ok(Self::with_pool(db, config))
    }

    /// Build state around an existing pool. The caller owns the pool's lifecycle.
    pub fn with_pool(db: PgPool, config: &Config) -> Self {
        let catalog = CatalogService::new(db.clone(), config.query_timeout);

        Self {
            inner: Arc::new(AppStateInner {
                db,
                catalog,
                default_page_size: config.default_page_size,
            }),
        }
    }

    /// Get the database pool.
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get the catalog service.
    pub fn catalog(&self) -> &Arc<CatalogService> {
        &self.inner.catalog
    }

    pub fn default_page_size(&self) -> u64 {
        self.inner.default_page_size
    }

    /// Check if PostgreSQL is healthy.
    pub async fn postgres_healthy(&self) -> bool {
        db::check_health(&self.inner.db).await
    }
}
