use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::ConfigError;
use crate::store::{SeedError, StoreError};
use crate::view::{error_page, not_found_page};

/// Failures surfaced by page handlers
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A path that cannot be decoded addresses nothing, so it is a miss.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::NotFound(format!("path ({})", rejection.body_text()))
    }
}

/// A malformed query cannot select a page variant, so it is a miss.
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::NotFound(format!("query ({})", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let page = match &self {
            AppError::NotFound(what) => {
                debug!(%what, "Rendering not-found page");
                not_found_page()
            }
            AppError::Store(e) => {
                error!(error = %e, "Store failure while rendering page");
                error_page()
            }
        };

        (status, Html(page)).into_response()
    }
}

/// Failures that abort startup
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to open store: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to seed store: {0}")]
    Seed(#[from] SeedError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_not_found_renders_404_page() {
        let response = AppError::NotFound("restaurant \"x\"".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Página não encontrada"));
    }

    #[tokio::test]
    async fn test_store_error_hides_details() {
        let error = AppError::from(StoreError::InvalidRecord("secret internals".into()));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(!html.contains("secret internals"));
    }
}
