//! Menu Domain Models
//!
//! Product records as stored, and the view models the product list renderer
//! produces from them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Stored Records
// =============================================================================

/// A product on a restaurant's menu
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier, also the routing key of the detail page
    pub id: Uuid,

    /// Owning restaurant
    pub restaurant_id: Uuid,

    pub name: String,

    /// Full description; never shortened in data, only visually
    pub description: String,

    /// Exact, non-negative amount in BRL
    pub price: Decimal,

    pub image_url: String,

    /// Ingredient list shown on the detail page
    #[serde(default)]
    pub ingredients: Vec<String>,
}

// =============================================================================
// View Models
// =============================================================================

/// A navigable product card
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: Uuid,

    /// Detail page target, `/{slug}/menu/{id}`
    pub href: String,

    pub name: String,

    pub description: String,

    /// Price passed through the currency formatter
    pub price: String,

    /// Thumbnail source, `None` when the host is not allow-listed
    pub image_url: Option<String>,
}

/// The rendered product list of one restaurant
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductListView {
    pub slug: String,

    /// One entry per product, in store order
    pub items: Vec<ProductSummary>,

    /// Placeholder shown instead of the list when `items` is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}
