//! Facet aggregation.
//!
//! Counts are taken under the full active predicate, including the counted
//! dimension's own selection. Selecting `brand=Acme,Globex` therefore
//! re-counts only Acme and Globex rows; it does not report what other brands
//! would yield if selected instead. Domains are computed with no predicate so
//! every selectable value is listed even when it currently matches nothing.

use anyhow::{Context, Result};
use sqlx::PgPool;

use super::bind::pg_arguments;
use super::predicate::Predicate;
use super::query_builder::{CatalogQueryBuilder, build_facet_domain};
use super::types::{Facet, FacetMap, FacetValue, Facets};

/// `(value, count)` pairs for one facet under the predicate, ordered by value.
pub async fn facet_counts(
    pool: &PgPool,
    predicate: &Predicate,
    facet: Facet,
) -> Result<Vec<FacetValue>> {
    let (sql, values) = CatalogQueryBuilder::new(predicate).build_facet_counts(facet);
    sqlx::query_as_with::<_, FacetValue, _>(&sql, pg_arguments(values)?)
        .fetch_all(pool)
        .await
        .with_context(|| format!("failed to count {} facet", facet.param()))
}

/// Every distinct stored value of a facet, ordered.
pub async fn facet_domain(pool: &PgPool, facet: Facet) -> Result<Vec<String>> {
    let (sql, values) = build_facet_domain(facet);
    sqlx::query_scalar_with::<_, String, _>(&sql, pg_arguments(values)?)
        .fetch_all(pool)
        .await
        .with_context(|| format!("failed to load {} facet domain", facet.param()))
}

/// Run all eight facet queries concurrently.
///
/// The first failure aborts the rest; partial facets are never returned.
pub async fn collect_facets(pool: &PgPool, predicate: &Predicate) -> Result<Facets> {
    let (
        brands,
        categories,
        colors,
        materials,
        all_brands,
        all_categories,
        all_colors,
        all_materials,
    ) = tokio::try_join!(
        facet_counts(pool, predicate, Facet::Brand),
        facet_counts(pool, predicate, Facet::Category),
        facet_counts(pool, predicate, Facet::Color),
        facet_counts(pool, predicate, Facet::Material),
        facet_domain(pool, Facet::Brand),
        facet_domain(pool, Facet::Category),
        facet_domain(pool, Facet::Color),
        facet_domain(pool, Facet::Material),
    )?;

    Ok(Facets {
        counts: FacetMap {
            brands,
            categories,
            colors,
            materials,
        },
        domains: FacetMap {
            brands: all_brands,
            categories: all_categories,
            colors: all_colors,
            materials: all_materials,
        },
    })
}
