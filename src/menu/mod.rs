//! Menu Domain Module
//!
//! This module contains the product side of the storefront:
//! - Domain models (Product, ProductSummary, ProductListView)
//! - Business logic helpers (currency formatting, product list rendering)
//! - Menu and product detail page handlers

pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types and functions
pub use handlers::routes;
pub use helpers::{build_product_list, format_currency};
pub use models::Product;
