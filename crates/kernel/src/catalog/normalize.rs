//! Request parameter normalization.
//!
//! Turns raw query parameters into a [`FilterSpec`]. Normalization never
//! fails: malformed values fall back to their defaults.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use rust_decimal::Decimal;

use super::types::{Facet, FilterSpec, MAX_ROWS, SortColumn, SortDirection};

impl FilterSpec {
    /// Build a filter spec from query parameters.
    ///
    /// `default_page_size` applies when `pageSize` is absent.
    pub fn from_params(params: &HashMap<String, String>, default_page_size: u64) -> Self {
        // PostgreSQL text cannot hold NUL, so it is dropped before anything else.
        let get = |key: &str| params.get(key).map(|raw| raw.replace('\0', ""));

        let sort_column = get("sort_by")
            .as_deref()
            .and_then(SortColumn::parse)
            .unwrap_or_default();
        let sort_direction = get("sort_order")
            .as_deref()
            .map(SortDirection::parse)
            .unwrap_or_default();

        Self {
            search_term: get("search")
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            brands: split_values(get(Facet::Brand.param()).as_deref()),
            categories: split_values(get(Facet::Category.param()).as_deref()),
            colors: split_values(get(Facet::Color.param()).as_deref()),
            materials: split_values(get(Facet::Material.param()).as_deref()),
            price_min: get("price_min").as_deref().and_then(parse_decimal),
            price_max: get("price_max").as_deref().and_then(parse_decimal),
            sort_column,
            sort_direction,
            page: get("page").as_deref().map_or(1, parse_positive),
            page_size: get("pageSize")
                .as_deref()
                .map_or(default_page_size.clamp(1, MAX_ROWS), parse_positive),
        }
    }
}

/// Split a comma-joined parameter into a trimmed, de-duplicated set.
///
/// Case is preserved; case-insensitive facets fold both sides in SQL.
fn split_values(raw: Option<&str>) -> BTreeSet<String> {
    let Some(raw) = raw else {
        return BTreeSet::new();
    };
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Integers below 1 clamp to 1; anything non-numeric is 1.
fn parse_positive(raw: &str) -> u64 {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(1)
        .max(1)
}
