//! Seed file loading
//!
//! A seed file is a JSON document listing restaurants with their products:
//!
//! ```json
//! {
//!   "restaurants": [{
//!     "slug": "doceria-abc",
//!     "name": "Doceria ABC",
//!     "avatarImageUrl": "https://u9a6wmr3as.ufs.sh/f/logo.png",
//!     "products": [
//!       { "name": "Brigadeiro", "description": "…", "price": "3.50", "imageUrl": "…" }
//!     ]
//!   }]
//! }
//! ```
//!
//! Ids are optional; missing ones are generated.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use super::StoreError;
use crate::menu::models::Product;
use crate::restaurant::models::Restaurant;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parsed seed document
#[derive(Debug, Deserialize)]
pub struct Seed {
    pub restaurants: Vec<SeedRestaurant>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRestaurant {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub avatar_image_url: String,
    #[serde(default)]
    pub cover_image_url: String,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedProduct {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Seed {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn from_file(path: &Path) -> Result<Self, SeedError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SeedError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json(&json)
    }

    /// Splits the document into store records, linking every product to its
    /// restaurant.
    pub fn into_records(self) -> Vec<(Restaurant, Vec<Product>)> {
        self.restaurants
            .into_iter()
            .map(|seed| {
                let restaurant_id = seed.id;
                let products = seed
                    .products
                    .into_iter()
                    .map(|product| Product {
                        id: product.id,
                        restaurant_id,
                        name: product.name,
                        description: product.description,
                        price: product.price,
                        image_url: product.image_url,
                        ingredients: product.ingredients,
                    })
                    .collect();
                let restaurant = Restaurant {
                    id: restaurant_id,
                    slug: seed.slug,
                    name: seed.name,
                    description: seed.description,
                    avatar_image_url: seed.avatar_image_url,
                    cover_image_url: seed.cover_image_url,
                };
                (restaurant, products)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"{
        "restaurants": [{
            "id": "0b9c4f57-2a38-4c3e-9a57-1f1c2d3e4f50",
            "slug": "doceria-abc",
            "name": "Doceria ABC",
            "avatarImageUrl": "/assets/withdraw.svg",
            "products": [
                { "name": "Brigadeiro", "price": "3.50", "imageUrl": "/a.png" },
                { "name": "Bolo", "description": "Fatia", "price": 19.9, "imageUrl": "/b.png",
                  "ingredients": ["Farinha"] }
            ]
        }]
    }"#;

    #[test]
    fn test_records_link_products_to_restaurant() {
        let records = Seed::from_json(SEED).unwrap().into_records();
        assert_eq!(records.len(), 1);

        let (restaurant, products) = &records[0];
        assert_eq!(restaurant.id.to_string(), "0b9c4f57-2a38-4c3e-9a57-1f1c2d3e4f50");
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.restaurant_id == restaurant.id));
        assert_eq!(products[0].price, Decimal::new(350, 2));
        assert_eq!(products[1].price, Decimal::new(199, 1));
        assert_eq!(products[1].ingredients, vec!["Farinha".to_owned()]);
        assert_ne!(products[0].id, products[1].id);
    }

    #[test]
    fn test_malformed_seed() {
        assert!(matches!(
            Seed::from_json(r#"{ "restaurants": [{ "slug": "x" }] }"#),
            Err(SeedError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = Seed::from_file(Path::new("/definitely/not/here.json")).await;
        assert!(matches!(result, Err(SeedError::Io { .. })));
    }

    #[tokio::test]
    async fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, SEED).unwrap();

        let seed = Seed::from_file(&path).await.unwrap();
        assert_eq!(seed.restaurants[0].slug, "doceria-abc");
    }
}
