//! Faceted catalog query engine.
//!
//! This module provides:
//! - FilterSpec normalization from raw request parameters
//! - Predicate: typed clauses rendered with bound parameters
//! - CatalogQueryBuilder: SeaQuery-based SQL generation
//! - Facet aggregation (counts under the predicate, unfiltered domains)
//! - CatalogService: concurrent fan-out and response assembly

mod bind;
pub mod facets;
mod normalize;
pub mod predicate;
pub mod query_builder;
mod service;
pub mod types;

pub use predicate::{Clause, Predicate};
pub use query_builder::CatalogQueryBuilder;
pub use service::CatalogService;
pub use types::{
    CatalogPage, DEFAULT_PAGE_SIZE, Facet, FacetMap, FacetValue, Facets, FilterSpec, Product,
    Products, SortColumn, SortDirection,
};
