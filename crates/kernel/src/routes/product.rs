//! Product catalog routes.
//!
//! `/products` runs a faceted search; `/products/{id}` is a point lookup.
//! Both are also served under `/api`.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::catalog::{CatalogPage, FilterSpec, Product};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Create the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/api/products", get(list_products))
        .route("/api/products/{id}", get(get_product))
}

/// Faceted product search.
async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<CatalogPage>> {
    let spec = FilterSpec::from_params(&params, state.default_page_size());
    let page = state.catalog().search(&spec).await?;
    Ok(Json(page))
}

/// Single product by id. Ids that are not integers cannot match any row.
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let Ok(id) = id.trim().parse::<i64>() else {
        return Err(AppError::NotFound);
    };

    let product = state
        .catalog()
        .get_product(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(product))
}
