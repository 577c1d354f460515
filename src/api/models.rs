//! API Response Models
//!
//! Every failing JSON endpoint answers with the same `{ code, message }`
//! envelope, so clients never have to parse an HTML error page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::AppError;

/// Error code returned with 404 responses
pub const NOT_FOUND_CODE: &str = "NOT_FOUND";
/// Error code returned with 500 responses
pub const INTERNAL_ERROR_CODE: &str = "INTERNAL_ERROR";

/// Error body of the JSON endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    /// Stable code for programmatic handling
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Body of `GET /healthz`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
        }
    }
}

/// [`AppError`] rendered as JSON instead of an HTML page.
#[derive(Debug)]
pub struct ApiFailure(pub AppError);

impl From<AppError> for ApiFailure {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = self.0.status();

        let body = match &self.0 {
            AppError::NotFound(what) => {
                debug!(%what, "API resource not found");
                ApiError::new(NOT_FOUND_CODE, format!("{what} not found"))
            }
            AppError::Store(e) => {
                error!(error = %e, "Store failure while serving API request");
                ApiError::new(INTERNAL_ERROR_CODE, "An internal error occurred")
            }
        };

        (status, Json(body)).into_response()
    }
}

impl ApiFailure {
    pub fn status(&self) -> StatusCode {
        self.0.status()
    }
}
