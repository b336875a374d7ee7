//! Catalog service for executing product queries.
//!
//! Assembles a [`CatalogPage`] from nine independent reads: the total count,
//! four facet counts, four facet domains and the product page. They share no
//! transaction, so under concurrent writes the parts may disagree slightly.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::debug;

use super::bind::pg_arguments;
use super::facets::collect_facets;
use super::predicate::Predicate;
use super::query_builder::{CatalogQueryBuilder, build_lookup};
use super::types::{CatalogPage, FilterSpec, Product};

/// Service for executing catalog queries.
pub struct CatalogService {
    pool: PgPool,
    /// Budget for one request's whole fan-out.
    query_timeout: Duration,
}

impl CatalogService {
    /// Create a new CatalogService over a pool owned by the caller.
    pub fn new(pool: PgPool, query_timeout: Duration) -> Arc<Self> {
        Arc::new(Self {
            pool,
            query_timeout,
        })
    }

    /// Run a faceted search.
    ///
    /// All nine queries are issued concurrently. The first failure, or the
    /// timeout, drops the outstanding ones and fails the whole request.
    pub async fn search(&self, spec: &FilterSpec) -> Result<CatalogPage> {
        let predicate = Predicate::from_spec(spec);
        let builder = CatalogQueryBuilder::new(&predicate);

        debug!(
            clauses = predicate.clauses().len(),
            sort = ?spec.sort_column,
            direction = ?spec.sort_direction,
            page = spec.page,
            page_size = spec.page_size,
            "executing catalog search"
        );

        let (count_sql, count_values) = builder.build_count();
        let count_args = pg_arguments(count_values)?;
        let (page_sql, page_values) = builder.build_page(spec);
        let page_args = pg_arguments(page_values)?;

        let total = async {
            sqlx::query_scalar_with::<_, i64, _>(&count_sql, count_args)
                .fetch_one(&self.pool)
                .await
                .context("failed to execute count query")
        };
        let page = async {
            sqlx::query_as_with::<_, Product, _>(&page_sql, page_args)
                .fetch_all(&self.pool)
                .await
                .context("failed to execute page query")
        };
        let fan_out = async {
            tokio::try_join!(total, collect_facets(&self.pool, &predicate), page)
        };

        let timeout = self.query_timeout;
        let (total_count, facets, products) = tokio::time::timeout(timeout, fan_out)
            .await
            .with_context(|| format!("catalog search timed out after {timeout:?}"))??;

        debug!(
            total = total_count,
            returned = products.len(),
            "catalog search complete"
        );

        Ok(CatalogPage::assemble(products, total_count, facets))
    }

    /// Look up one product. `None` means no row has this id.
    pub async fn get_product(&self, id: i64) -> Result<Option<Product>> {
        let (sql, values) = build_lookup(id);
        sqlx::query_as_with::<_, Product, _>(&sql, pg_arguments(values)?)
            .fetch_optional(&self.pool)
            .await
            .context("failed to load product")
    }
}
