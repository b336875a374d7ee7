//! Application error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("product not found")]
    NotFound,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
        };

        // Storage details go to the log, never to the client.
        let error = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "internal server error");
                "internal server error".to_string()
            }
            AppError::NotFound => self.to_string(),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "product not found");
    }

    #[tokio::test]
    async fn internal_errors_are_opaque() {
        let err = anyhow::anyhow!("relation \"products\" does not exist")
            .context("failed to execute count query");
        let response = AppError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "internal server error");
        assert!(!body.to_string().contains("products"));
    }

    #[tokio::test]
    async fn storage_errors_are_opaque() {
        let err = anyhow::Error::new(sqlx::Error::PoolTimedOut).context("failed to load product");
        let response = AppError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "internal server error");
    }
}
