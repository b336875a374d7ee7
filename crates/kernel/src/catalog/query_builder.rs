//! Catalog query builder using SeaQuery.
//!
//! Generates parameterized PostgreSQL statements for:
//! - Total count under a predicate
//! - Sorted, paginated product pages
//! - Facet counts and unfiltered facet domains
//! - Single product lookup
//!
//! Every builder returns the SQL text together with its bound values; user
//! input never appears in the SQL text itself.

use sea_query::{Alias, Asterisk, Expr, Order, PostgresQueryBuilder, Query, SelectStatement, Values};

use super::predicate::Predicate;
use super::types::{Facet, FilterSpec, Products, SortColumn, SortDirection};

/// SQL text plus the values bound to its placeholders.
pub type BuiltQuery = (String, Values);

/// Query builder for one catalog request.
pub struct CatalogQueryBuilder<'a> {
    predicate: &'a Predicate,
}

impl<'a> CatalogQueryBuilder<'a> {
    pub fn new(predicate: &'a Predicate) -> Self {
        Self { predicate }
    }

    /// Build a COUNT query for total results.
    pub fn build_count(&self) -> BuiltQuery {
        let mut query = Query::select();
        query
            .expr(Expr::col(Asterisk).count())
            .from(Products::Table);
        self.predicate.apply(&mut query);
        query.build(PostgresQueryBuilder)
    }

    /// Build the page query: full predicate, then sort, then LIMIT/OFFSET.
    ///
    /// Rows with equal sort keys are ordered by `id` ascending.
    pub fn build_page(&self, spec: &FilterSpec) -> BuiltQuery {
        let mut query = Query::select();
        add_product_columns(&mut query);
        query.from(Products::Table);
        self.predicate.apply(&mut query);

        let order = match spec.sort_direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        query.order_by((Products::Table, spec.sort_column.column()), order);
        if spec.sort_column != SortColumn::Id {
            query.order_by((Products::Table, Products::Id), Order::Asc);
        }

        query.limit(spec.page_size);
        query.offset(spec.offset());

        query.build(PostgresQueryBuilder)
    }

    /// Build a `(value, count)` query for one facet under the full predicate,
    /// including the facet's own selection.
    pub fn build_facet_counts(&self, facet: Facet) -> BuiltQuery {
        let column = (Products::Table, facet.column());
        let mut query = Query::select();
        query
            .expr_as(Expr::col(column), Alias::new("value"))
            .expr_as(Expr::col(Asterisk).count(), Alias::new("count"))
            .from(Products::Table);
        self.predicate.apply(&mut query);
        query.group_by_col(column).order_by(column, Order::Asc);
        query.build(PostgresQueryBuilder)
    }
}

/// Build the distinct-values query for a facet. No predicate applies.
pub fn build_facet_domain(facet: Facet) -> BuiltQuery {
    let column = (Products::Table, facet.column());
    Query::select()
        .distinct()
        .column(column)
        .from(Products::Table)
        .order_by(column, Order::Asc)
        .build(PostgresQueryBuilder)
}

/// Build a point lookup by product id.
pub fn build_lookup(id: i64) -> BuiltQuery {
    let mut query = Query::select();
    add_product_columns(&mut query);
    query
        .from(Products::Table)
        .and_where(Expr::col((Products::Table, Products::Id)).eq(id));
    query.build(PostgresQueryBuilder)
}

fn add_product_columns(query: &mut SelectStatement) {
    query.columns(
        Products::PRODUCT_COLUMNS
            .iter()
            .map(|column| (Products::Table, *column)),
    );
}
