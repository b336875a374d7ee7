//! HTTP route handlers.

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod product;

/// All kernel routes, without middleware layers or state.
pub fn app() -> Router<AppState> {
    Router::new()
        .merge(product::router())
        .merge(health::router())
}
