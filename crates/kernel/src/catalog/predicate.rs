//! Predicate construction.
//!
//! A [`Predicate`] is the conjunction of per-dimension [`Clause`]s derived
//! from a [`FilterSpec`]. Clauses render to SeaQuery expressions whose values
//! are always emitted as bound parameters.
//!
//! Case-insensitive comparisons apply `LOWER` to both the column and the bound
//! value, so the database's collation folds both sides the same way.

use rust_decimal::Decimal;
use sea_query::{Alias, BinOper, Cond, Expr, Func, SelectStatement, SimpleExpr};

use super::types::{Facet, FilterSpec, Products};

/// Columns searched by the free-text term.
const SEARCH_COLUMNS: [Products; 5] = [
    Products::Name,
    Products::Description,
    Products::Brand,
    Products::Material,
    Products::Category,
];

/// One AND-ed condition of a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Facet column equals a single value.
    Equals { facet: Facet, value: String },
    /// Facet column is one of several values.
    AnyOf { facet: Facet, values: Vec<String> },
    /// Inclusive lower price bound.
    PriceAtLeast(Decimal),
    /// Inclusive upper price bound.
    PriceAtMost(Decimal),
    /// Case-insensitive substring match across [`SEARCH_COLUMNS`].
    Search(String),
}

impl Clause {
    /// Render the clause as a condition.
    pub fn to_expr(&self) -> SimpleExpr {
        match self {
            Clause::Equals { facet, value } => facet_expr(*facet).eq(facet_value(*facet, value)),
            Clause::AnyOf { facet, values } => {
                facet_expr(*facet).is_in(values.iter().map(|v| facet_value(*facet, v)))
            }
            Clause::PriceAtLeast(min) => Expr::col((Products::Table, Products::Price)).gte(*min),
            Clause::PriceAtMost(max) => Expr::col((Products::Table, Products::Price)).lte(*max),
            Clause::Search(term) => {
                let pattern = format!("%{}%", escape_like_wildcards(term));
                SEARCH_COLUMNS
                    .iter()
                    .fold(Cond::any(), |cond, column| {
                        cond.add(
                            Expr::expr(Func::lower(Expr::col((Products::Table, *column))))
                                .binary(BinOper::Like, Func::lower(Expr::val(pattern.as_str()))),
                        )
                    })
                    .into()
            }
        }
    }
}

/// Conjunction of clauses for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// Derive the predicate for a filter spec.
    ///
    /// Clause order is fixed: brand, category, color, material, price_min,
    /// price_max, search. Within a dimension values keep the filter's sorted
    /// order, so equal specs always render identical SQL.
    pub fn from_spec(spec: &FilterSpec) -> Self {
        let mut clauses = Vec::new();

        for facet in Facet::ALL {
            let selected = spec.selected(facet);
            match selected.len() {
                0 => {}
                1 => {
                    if let Some(value) = selected.first() {
                        clauses.push(Clause::Equals {
                            facet,
                            value: value.clone(),
                        });
                    }
                }
                _ => clauses.push(Clause::AnyOf {
                    facet,
                    values: selected.iter().cloned().collect(),
                }),
            }
        }

        if let Some(min) = spec.price_min {
            clauses.push(Clause::PriceAtLeast(min));
        }
        if let Some(max) = spec.price_max {
            clauses.push(Clause::PriceAtMost(max));
        }
        if let Some(ref term) = spec.search_term {
            clauses.push(Clause::Search(term.clone()));
        }

        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// True when the predicate matches every row.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// AND every clause into the statement's WHERE.
    pub fn apply(&self, query: &mut SelectStatement) {
        for clause in &self.clauses {
            query.and_where(clause.to_expr());
        }
    }
}

/// Column expression for a facet, folded for case-insensitive dimensions.
fn facet_expr(facet: Facet) -> Expr {
    let column = Expr::col((Products::Table, facet.column()));
    if facet.is_case_folded() {
        Expr::expr(Func::lower(Func::cust(Alias::new("TRIM")).arg(column)))
    } else {
        column
    }
}

/// Bound value compared against [`facet_expr`], folded the same way.
fn facet_value(facet: Facet, value: &str) -> SimpleExpr {
    if facet.is_case_folded() {
        Func::lower(Expr::val(value)).into()
    } else {
        Expr::val(value).into()
    }
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
