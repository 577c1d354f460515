//! Restaurant landing page handler
//!
//! Serves `GET /{slug}`: the restaurant identity plus the consumption method
//! selector.

use super::helpers::{render_restaurant_page, resolve_restaurant};
use crate::{error::AppError, state::SharedState};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Html,
    routing::get,
    Router,
};

/// Creates routes for the restaurant landing page
pub fn routes() -> Router<SharedState> {
    Router::new().route("/:slug", get(restaurant_page))
}

/// Endpoint: GET /{slug}
/// Renders the landing page or the 404 page when the slug is unknown or
/// cannot be decoded.
async fn restaurant_page(
    State(state): State<SharedState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let Path(slug) = path?;
    let restaurant = resolve_restaurant(state.store.as_ref(), &slug).await?;

    Ok(Html(render_restaurant_page(&restaurant, &state.images)))
}
