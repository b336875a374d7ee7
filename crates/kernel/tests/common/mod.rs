#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! This module provides test infrastructure that uses the REAL kernel code,
//! not mock implementations. This ensures tests verify actual behavior.
//!
//! Database-backed tests are `#[ignore]`d so a plain `cargo test` never
//! reports them as passing without running them. Run them against PostgreSQL
//! with:
//!
//! ```text
//! DATABASE_URL=postgres://... cargo test -p storefront-kernel -- --ignored
//! ```

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;

use storefront_kernel::{AppState, Config, routes};

/// Build real application state against `DATABASE_URL`.
///
/// Each test gets its own pool on its own runtime; migrations are idempotent.
pub async fn test_state() -> AppState {
    dotenvy::dotenv().ok();

    let config = Config::from_env().expect("DATABASE_URL must be set for database tests");
    AppState::new(&config)
        .await
        .expect("Failed to initialize AppState")
}

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new(state: AppState) -> Self {
        // Build the REAL router (must match main.rs, minus CORS)
        let router = routes::app()
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        Self { router, state }
    }

    /// Send a GET request and decode the JSON body.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body should be JSON")
        };
        (status, body)
    }
}
