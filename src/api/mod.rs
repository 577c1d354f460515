//! JSON API Module
//!
//! Machine-readable twins of the storefront pages plus a liveness probe:
//! - Response models (ApiError envelope, health payload)
//! - Route handlers for `/api/restaurants/*` and `/healthz`

pub mod handlers;
pub mod models;

// Re-export commonly used types and functions
pub use handlers::routes;
pub use models::{ApiError, ApiFailure};
