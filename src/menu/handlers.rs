//! Menu page handlers
//!
//! This module implements the menu page and the product detail page, both
//! scoped by the restaurant slug.

use super::helpers::{build_product_list, render_menu_page, render_product_page};
use crate::{
    error::AppError,
    restaurant::{resolve_restaurant, ConsumptionMethod},
    state::SharedState,
};
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Html,
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

/// Creates routes for the menu and product pages
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/:slug/menu", get(menu_page))
        .route("/:slug/menu/:product_id", get(product_page))
}

/// Query string of the menu page
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    #[serde(rename = "consumptionMethod")]
    pub consumption_method: Option<String>,
}

/// Endpoint: GET /{slug}/menu?consumptionMethod=WITHDRAW|DELIVERY
/// A missing, unknown or repeated consumption method is treated as an
/// unknown page.
async fn menu_page(
    State(state): State<SharedState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<MenuQuery>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    let Path(slug) = path?;
    let Query(query) = query?;
    let restaurant = resolve_restaurant(state.store.as_ref(), &slug).await?;

    let method = query
        .consumption_method
        .as_deref()
        .unwrap_or_default()
        .parse::<ConsumptionMethod>()
        .map_err(|e| {
            debug!(slug = %slug, error = %e, "Rejecting menu request");
            AppError::NotFound(format!("menu of {slug:?}"))
        })?;

    let products = state.store.list_products(restaurant.id).await?;
    let list = build_product_list(&restaurant.slug, &products, &state.images);

    Ok(Html(render_menu_page(&restaurant, method, &list, &state.images)))
}

/// Endpoint: GET /{slug}/menu/{product_id}
/// Only products owned by the addressed restaurant are reachable.
async fn product_page(
    State(state): State<SharedState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let Path((slug, product_id)) = path?;
    let restaurant = resolve_restaurant(state.store.as_ref(), &slug).await?;

    let not_found = || AppError::NotFound(format!("product {product_id:?} of {slug:?}"));
    let id = Uuid::parse_str(&product_id).map_err(|_| not_found())?;

    let product = state
        .store
        .list_products(restaurant.id)
        .await?
        .into_iter()
        .find(|product| product.id == id)
        .ok_or_else(not_found)?;

    Ok(Html(render_product_page(&restaurant, &product, &state.images)))
}
