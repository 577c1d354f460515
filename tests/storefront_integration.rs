//! Integration tests for the storefront router
//!
//! These tests drive the full router with the bundled seed data:
//! - Restaurant landing page and slug resolution
//! - Menu page with the consumption method query
//! - Product detail pages scoped by restaurant
//! - JSON API, health check, static assets and the fallback

use axum::body::Body;
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`
use uuid::Uuid;

use restaurant_storefront::config::Config;
use restaurant_storefront::menu::Product;
use restaurant_storefront::restaurant::Restaurant;
use restaurant_storefront::router::create_app_router;
use restaurant_storefront::state::AppState;
use restaurant_storefront::store::InMemoryStore;
use restaurant_storefront::view::ImageHostAllowList;

const BRIGADEIRO_ID: &str = "a3b7c9d1-2e4f-4a6b-8c0d-1e2f3a4b5c61";
const BIG_MAC_ID: &str = "d6e0f2a4-5b7c-4d9e-9f3a-4b5c6d7e8f94";

/// Helper function to create an app seeded from `assets/seed.json`
async fn create_test_app() -> axum::Router {
    let seed = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/seed.json");
    let config = Config {
        seed_file: Some(seed),
        ..Config::from_lookup(|_| None).unwrap()
    };
    let state = AppState::from_config(&config).await.unwrap();
    create_app_router(Arc::new(state))
}

/// Helper function to GET a path and return status and body text
async fn get(app: &axum::Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8_lossy(&body_bytes).into_owned())
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

// =============================================================================
// Restaurant Page
// =============================================================================

#[tokio::test]
async fn test_restaurant_page_renders_identity_and_options() {
    let app = create_test_app().await;
    let (status, html) = get(&app, "/doceria-abc").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Doceria ABC"));
    assert!(html.contains("Seja bem-vindo!"));
    assert!(html.contains(r#"alt="Imagem do restaurante""#));
    assert!(html.contains("/doceria-abc/menu?consumptionMethod=WITHDRAW"));
    assert!(html.contains("/doceria-abc/menu?consumptionMethod=DELIVERY"));
    assert!(html.contains("Para retirar"));
    assert!(html.contains("Para entregar"));
}

#[tokio::test]
async fn test_unknown_slug_is_not_found() {
    let app = create_test_app().await;
    let (status, html) = get(&app, "/nonexistent-slug").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Página não encontrada"));
    assert!(!html.contains("Seja bem-vindo!"));
}

#[tokio::test]
async fn test_slug_lookup_is_case_sensitive() {
    let app = create_test_app().await;
    let (status, _) = get(&app, "/Doceria-ABC").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Menu Page
// =============================================================================

#[tokio::test]
async fn test_menu_lists_every_product_with_formatted_price() {
    let app = create_test_app().await;
    let (status, html) = get(&app, "/doceria-abc/menu?consumptionMethod=DELIVERY").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches(r#"class="product-card""#).count(), 3);
    assert!(html.contains("R$\u{a0}4,50"));
    assert!(html.contains("R$\u{a0}1.290,00"));
    assert!(html.contains(&format!("/doceria-abc/menu/{BRIGADEIRO_ID}")));
    assert!(html.contains("line-clamp-2"));
    assert!(html.contains("Para entregar"));
    assert!(!html.contains("McOferta"));
}

#[tokio::test]
async fn test_menu_rejects_missing_or_unknown_method() {
    let app = create_test_app().await;

    for uri in [
        "/doceria-abc/menu",
        "/doceria-abc/menu?consumptionMethod=PICKUP",
        "/doceria-abc/menu?consumptionMethod=withdraw",
        "/nonexistent-slug/menu?consumptionMethod=WITHDRAW",
    ] {
        let (status, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_empty_menu_shows_placeholder() {
    let store = InMemoryStore::new();
    store
        .insert_restaurant(Restaurant {
            id: Uuid::new_v4(),
            slug: "cozinha-vazia".into(),
            name: "Cozinha Vazia".into(),
            description: String::new(),
            avatar_image_url: "/assets/withdraw.svg".into(),
            cover_image_url: String::new(),
        })
        .unwrap();
    let app = create_app_router(Arc::new(AppState::new(
        Arc::new(store),
        ImageHostAllowList::default(),
    )));

    let (status, html) = get(&app, "/cozinha-vazia/menu?consumptionMethod=WITHDRAW").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Nenhum produto disponível no momento."));
    assert!(!html.contains(r#"class="product-card""#));
}

#[tokio::test]
async fn test_disallowed_image_host_is_omitted() {
    let store = InMemoryStore::new();
    let restaurant = Restaurant {
        id: Uuid::new_v4(),
        slug: "casa-externa".into(),
        name: "Casa Externa".into(),
        description: String::new(),
        avatar_image_url: "https://u9a6wmr3as.ufs.sh/f/logo.png".into(),
        cover_image_url: String::new(),
    };
    store.insert_restaurant(restaurant.clone()).unwrap();
    store
        .insert_product(Product {
            id: Uuid::new_v4(),
            restaurant_id: restaurant.id,
            name: "Pastel".into(),
            description: "Pastel de feira".into(),
            price: Decimal::new(800, 2),
            image_url: "https://evil.example.com/pastel.png".into(),
            ingredients: Vec::new(),
        })
        .unwrap();
    let app = create_app_router(Arc::new(AppState::new(
        Arc::new(store),
        ImageHostAllowList::default(),
    )));

    let (status, html) = get(&app, "/casa-externa/menu?consumptionMethod=WITHDRAW").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Pastel"));
    assert!(!html.contains("evil.example.com"));
}

// =============================================================================
// Product Page
// =============================================================================

#[tokio::test]
async fn test_product_page_shows_details() {
    let app = create_test_app().await;
    let (status, html) = get(&app, &format!("/doceria-abc/menu/{BRIGADEIRO_ID}")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Brigadeiro Gourmet"));
    assert!(html.contains("Chocolate belga"));
    assert!(html.contains("R$\u{a0}4,50"));
    assert!(html.contains(r#"href="/doceria-abc""#));
}

#[tokio::test]
async fn test_product_of_other_restaurant_is_not_found() {
    let app = create_test_app().await;

    let (status, _) = get(&app, &format!("/doceria-abc/menu/{BIG_MAC_ID}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, &format!("/fsw-donalds/menu/{BIG_MAC_ID}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_product_id_is_not_found() {
    let app = create_test_app().await;
    let (status, html) = get(&app, "/doceria-abc/menu/not-a-uuid").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Página não encontrada"));
}

// =============================================================================
// JSON API and Infrastructure
// =============================================================================

#[tokio::test]
async fn test_api_restaurant() {
    let app = create_test_app().await;
    let (status, body) = get_json(&app, "/api/restaurants/fsw-donalds").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "fsw-donalds");
    assert_eq!(body["name"], "FSW Donalds");
    assert!(body["avatarImageUrl"].as_str().unwrap().contains("ufs.sh"));
}

#[tokio::test]
async fn test_api_products() {
    let app = create_test_app().await;
    let (status, body) = get_json(&app, "/api/restaurants/fsw-donalds/products").await;

    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], BIG_MAC_ID);
    assert_eq!(items[0]["href"], format!("/fsw-donalds/menu/{BIG_MAC_ID}"));
    assert_eq!(items[0]["price"], "R$\u{a0}39,90");
    assert!(body.get("emptyMessage").is_none());
}

#[tokio::test]
async fn test_api_unknown_restaurant() {
    let app = create_test_app().await;
    let (status, body) = get_json(&app, "/api/restaurants/nonexistent-slug/products").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_healthz() {
    let app = create_test_app().await;
    let (status, body) = get_json(&app, "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let app = create_test_app().await;
    let (status, body) = get(&app, "/assets/withdraw.svg").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<svg"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app().await;

    for uri in ["/doceria-abc/cardapio", "/doceria-abc/menu/a/b", "/a/b/c/d"] {
        let (status, html) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(html.contains("Página não encontrada"), "{uri}");
    }
}

#[tokio::test]
async fn test_undecodable_slug_is_not_found() {
    let app = create_test_app().await;

    for uri in ["/%FF", "/%FF/menu?consumptionMethod=WITHDRAW", "/doceria-abc/menu/%FF"] {
        let (status, html) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(html.contains("Página não encontrada"), "{uri}");
    }

    let (status, body) = get_json(&app, "/api/restaurants/%FF").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, body) = get_json(&app, "/api/restaurants/%FF/products").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_repeated_consumption_method_is_not_found() {
    let app = create_test_app().await;
    let (status, html) = get(
        &app,
        "/doceria-abc/menu?consumptionMethod=WITHDRAW&consumptionMethod=DELIVERY",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Página não encontrada"));
}
