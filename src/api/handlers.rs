//! JSON API route handlers
//!
//! The restaurant and product endpoints resolve the slug exactly like the
//! pages do, so a slug that 404s as HTML also 404s here.

use super::models::{ApiFailure, HealthStatus};
use crate::{
    error::AppError,
    menu::{build_product_list, models::ProductListView},
    restaurant::{resolve_restaurant, Restaurant},
    state::SharedState,
};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};

/// Creates routes for the JSON API and the health check
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/restaurants/:slug", get(get_restaurant))
        .route("/api/restaurants/:slug/products", get(list_products))
        .route("/healthz", get(health))
}

/// Endpoint: GET /api/restaurants/{slug}
async fn get_restaurant(
    State(state): State<SharedState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Restaurant>, ApiFailure> {
    let Path(slug) = path.map_err(AppError::from)?;
    let restaurant = resolve_restaurant(state.store.as_ref(), &slug).await?;
    Ok(Json(restaurant))
}

/// Endpoint: GET /api/restaurants/{slug}/products
/// Same view model the menu page renders, prices already formatted.
async fn list_products(
    State(state): State<SharedState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ProductListView>, ApiFailure> {
    let Path(slug) = path.map_err(AppError::from)?;
    let restaurant = resolve_restaurant(state.store.as_ref(), &slug).await?;
    let products = state
        .store
        .list_products(restaurant.id)
        .await
        .map_err(AppError::from)?;

    Ok(Json(build_product_list(
        &restaurant.slug,
        &products,
        &state.images,
    )))
}

/// Endpoint: GET /healthz
async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}
