//! Entity Store
//!
//! The storage seam of the application. Rendering code only ever sees the
//! [`EntityStore`] trait, which exposes the two query shapes the pages need:
//!
//! - find one restaurant by its unique slug
//! - list the products of one restaurant, in insertion order
//!
//! Two backends implement it: [`InMemoryStore`] (default, seeded at startup)
//! and [`SqliteStore`] (selected with `DATABASE_URL`).

pub mod memory;
pub mod seed;
pub mod sqlite;

pub use memory::InMemoryStore;
pub use seed::{Seed, SeedError};
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::menu::models::Product;
use crate::restaurant::{helpers::validate_slug, models::Restaurant};

/// Errors raised by any store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Duplicate key: {0}")]
    Duplicate(String),
}

/// Read-only query surface used by the pages.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Exact, case-sensitive lookup by slug. `Ok(None)` when no row matches.
    async fn find_restaurant_by_slug(&self, slug: &str) -> Result<Option<Restaurant>, StoreError>;

    /// Products owned by `restaurant_id`, in insertion order. Unknown ids
    /// yield an empty list.
    async fn list_products(&self, restaurant_id: Uuid) -> Result<Vec<Product>, StoreError>;
}

// =============================================================================
// Record Validation
// =============================================================================

/// Checks the restaurant invariants enforced on insert.
pub fn validate_restaurant(restaurant: &Restaurant) -> Result<(), StoreError> {
    validate_slug(&restaurant.slug).map_err(|reason| {
        StoreError::InvalidRecord(format!("slug {:?} {reason}", restaurant.slug))
    })?;

    if restaurant.name.trim().is_empty() {
        return Err(StoreError::InvalidRecord(format!(
            "restaurant {:?} has an empty name",
            restaurant.slug
        )));
    }

    Ok(())
}

/// Checks the product invariants enforced on insert.
pub fn validate_product(product: &Product) -> Result<(), StoreError> {
    if product.price < Decimal::ZERO {
        return Err(StoreError::InvalidRecord(format!(
            "product {} has a negative price ({})",
            product.id, product.price
        )));
    }

    if product.name.trim().is_empty() {
        return Err(StoreError::InvalidRecord(format!(
            "product {} has an empty name",
            product.id
        )));
    }

    Ok(())
}
