//! Restaurant Domain Module
//!
//! This module contains everything addressed by a restaurant slug:
//! - Domain models (Restaurant, ConsumptionMethod, selector options)
//! - Business logic helpers (slug rules, resolver, landing page rendering)
//! - The landing page handler

pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use helpers::resolve_restaurant;
pub use models::{ConsumptionMethod, Restaurant};
