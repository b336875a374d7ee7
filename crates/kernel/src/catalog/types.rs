//! Catalog query engine types.
//!
//! Provides type definitions for the faceted product query:
//! - FilterSpec: Normalized request (filters, sort, pagination)
//! - Product: Read-only catalog row
//! - Facet / FacetValue: Filterable dimensions and their counts
//! - CatalogPage: The assembled response

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use sea_query::Iden;
use serde::{Deserialize, Serialize};

/// Page size used when the request does not name one.
pub const DEFAULT_PAGE_SIZE: u64 = 12;

/// Largest row count or offset PostgreSQL accepts (`BIGINT`).
pub const MAX_ROWS: u64 = i64::MAX as u64;

/// Identifiers for the catalog relation and its columns.
///
/// `Products::Table` renders as `products`; every other variant renders as
/// its snake_case column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Iden)]
pub enum Products {
    Table,
    Id,
    Name,
    Description,
    Brand,
    Category,
    Color,
    Material,
    Price,
    Rating,
    Image,
    Storage,
    Size,
    Capacity,
}

impl Products {
    /// Columns projected for a [`Product`] row, in declaration order.
    pub const PRODUCT_COLUMNS: [Products; 13] = [
        Products::Id,
        Products::Name,
        Products::Description,
        Products::Brand,
        Products::Category,
        Products::Color,
        Products::Material,
        Products::Price,
        Products::Rating,
        Products::Image,
        Products::Storage,
        Products::Size,
        Products::Capacity,
    ];
}

/// Columns a caller may sort by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortColumn {
    #[default]
    Id,
    Name,
    Price,
    Brand,
    Category,
}

impl SortColumn {
    /// Resolve a `sort_by` parameter. Anything outside the allow-list is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            "brand" => Some(Self::Brand),
            "category" => Some(Self::Category),
            _ => None,
        }
    }

    /// The column this sort key orders by.
    pub fn column(self) -> Products {
        match self {
            Self::Id => Products::Id,
            Self::Name => Products::Name,
            Self::Price => Products::Price,
            Self::Brand => Products::Brand,
            Self::Category => Products::Category,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case selects descending; everything else is ascending.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// A filterable attribute dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Brand,
    Category,
    Color,
    Material,
}

impl Facet {
    /// All facet dimensions, in response order.
    pub const ALL: [Facet; 4] = [Facet::Brand, Facet::Category, Facet::Color, Facet::Material];

    /// The column this facet groups by.
    pub fn column(self) -> Products {
        match self {
            Self::Brand => Products::Brand,
            Self::Category => Products::Category,
            Self::Color => Products::Color,
            Self::Material => Products::Material,
        }
    }

    /// Whether comparisons on this facet ignore case and surrounding whitespace.
    pub fn is_case_folded(self) -> bool {
        matches!(self, Self::Color | Self::Material)
    }

    /// Query parameter carrying this facet's selection.
    pub fn param(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Category => "category",
            Self::Color => "color",
            Self::Material => "material",
        }
    }
}

/// Normalized, immutable description of one catalog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Free-text search across name, description, brand, material and category.
    pub search_term: Option<String>,
    pub brands: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    /// Trimmed; matched case-insensitively.
    pub colors: BTreeSet<String>,
    /// Trimmed; matched case-insensitively.
    pub materials: BTreeSet<String>,
    /// Inclusive lower price bound.
    pub price_min: Option<Decimal>,
    /// Inclusive upper price bound.
    pub price_max: Option<Decimal>,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    /// 1-based page number.
    pub page: u64,
    /// At most [`MAX_ROWS`].
    pub page_size: u64,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            search_term: None,
            brands: BTreeSet::new(),
            categories: BTreeSet::new(),
            colors: BTreeSet::new(),
            materials: BTreeSet::new(),
            price_min: None,
            price_max: None,
            sort_column: SortColumn::default(),
            sort_direction: SortDirection::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterSpec {
    /// Selected values for a facet dimension.
    pub fn selected(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Brand => &self.brands,
            Facet::Category => &self.categories,
            Facet::Color => &self.colors,
            Facet::Material => &self.materials,
        }
    }

    /// Row offset of the first product on the requested page, capped at
    /// [`MAX_ROWS`].
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(MAX_ROWS)
    }
}

/// A catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub brand: String,
    pub category: String,
    pub color: String,
    pub material: String,
    pub price: Decimal,
    pub rating: Option<f64>,
    pub image: Option<String>,
    /// Only present for storage devices.
    pub storage: Option<String>,
    /// Only present for sized goods.
    pub size: Option<String>,
    /// Only present for containers and appliances.
    pub capacity: Option<String>,
}

/// Number of matching rows carrying one facet value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FacetValue {
    pub value: String,
    pub count: i64,
}

/// Per-dimension facet lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetMap<T> {
    pub brands: T,
    pub categories: T,
    pub colors: T,
    pub materials: T,
}

/// Facet counts under the active predicate plus the unfiltered domains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub counts: FacetMap<Vec<FacetValue>>,
    pub domains: FacetMap<Vec<String>>,
}

/// Everything a listing page needs from one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub products: Vec<Product>,
    pub total_count: i64,
    pub brands: Vec<FacetValue>,
    pub categories: Vec<FacetValue>,
    pub colors: Vec<FacetValue>,
    pub materials: Vec<FacetValue>,
    pub all_brands: Vec<String>,
    pub all_categories: Vec<String>,
    pub all_colors: Vec<String>,
    pub all_materials: Vec<String>,
}

impl CatalogPage {
    /// Merge the independently fetched parts of a response.
    pub fn assemble(products: Vec<Product>, total_count: i64, facets: Facets) -> Self {
        let Facets { counts, domains } = facets;
        Self {
            products,
            total_count,
            brands: counts.brands,
            categories: counts.categories,
            colors: counts.colors,
            materials: counts.materials,
            all_brands: domains.brands,
            all_categories: domains.categories,
            all_colors: domains.colors,
            all_materials: domains.materials,
        }
    }
}
