//! Routing module for the storefront
//!
//! Page routes claim the single-segment namespace `/{slug}`, so the static
//! prefixes mounted here (`/api`, `/assets`, `/healthz`) are reserved slugs.

use crate::{error::AppError, state::SharedState};
use axum::{
    body::Body,
    extract::Request,
    http::{header::CONTENT_TYPE, Method},
    middleware::Next,
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{debug, warn};

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let method = req.method().clone();
        let uri = req.uri().clone();
        debug!(%method, %uri, "Request");

        let res = next.run(req).await;
        if res.status().is_server_error() {
            warn!(%method, %uri, status = %res.status(), "Request failed");
        } else if !res.status().is_success() {
            debug!(%method, %uri, status = %res.status(), "Request not served");
        }
        res
    });

    // Middleware: CORS (read-only surface)
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let assets = ServeDir::new(&state.assets_dir);

    // Routes
    Router::new()
        .merge(crate::api::routes())
        .merge(crate::restaurant::routes())
        .merge(crate::menu::routes())
        .nest_service("/assets", assets)
        .fallback(unknown_route)
        .layer(log_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Any path no route claims renders the not-found page.
async fn unknown_route(req: Request<Body>) -> AppError {
    AppError::NotFound(format!("route {}", req.uri().path()))
}
