//! Restaurant Storefront Library
//!
//! Customer-facing storefront for restaurants: a landing page per restaurant
//! slug with the consumption method selector, the menu with its product list,
//! product detail pages and a small read-only JSON API.

// Domain modules
pub mod api;
pub mod menu;
pub mod restaurant;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod server;
pub mod state;
pub mod store;
pub mod view;
