//! In-memory entity store
//!
//! Records live in `DashMap`s so concurrent request handlers can read without
//! an external lock. Used by default and by the tests.

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use tracing::info;
use uuid::Uuid;

use super::{validate_product, validate_restaurant, EntityStore, StoreError};
use crate::menu::models::Product;
use crate::restaurant::models::Restaurant;

/// Concurrent in-memory storage
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Restaurants keyed by slug.
    restaurants: DashMap<String, Restaurant>,

    /// Products keyed by owning restaurant id, in insertion order.
    products: DashMap<Uuid, Vec<Product>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a restaurant. Slugs are unique and cannot be reassigned.
    pub fn insert_restaurant(&self, restaurant: Restaurant) -> Result<(), StoreError> {
        validate_restaurant(&restaurant)?;

        if self.restaurants.iter().any(|entry| entry.id == restaurant.id) {
            return Err(StoreError::Duplicate(format!("restaurant id {}", restaurant.id)));
        }

        match self.restaurants.entry(restaurant.slug.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(format!("slug {:?}", restaurant.slug))),
            Entry::Vacant(slot) => {
                slot.insert(restaurant);
                Ok(())
            }
        }
    }

    /// Appends a product to its restaurant's list.
    pub fn insert_product(&self, product: Product) -> Result<(), StoreError> {
        validate_product(&product)?;

        if !self
            .restaurants
            .iter()
            .any(|entry| entry.id == product.restaurant_id)
        {
            return Err(StoreError::InvalidRecord(format!(
                "product {} references unknown restaurant {}",
                product.id, product.restaurant_id
            )));
        }

        if self
            .products
            .iter()
            .any(|entry| entry.iter().any(|existing| existing.id == product.id))
        {
            return Err(StoreError::Duplicate(format!("product id {}", product.id)));
        }

        self.products
            .entry(product.restaurant_id)
            .or_default()
            .push(product);
        Ok(())
    }

    /// Imports seed records. A restaurant whose slug already exists is skipped
    /// together with its products. A restaurant with a rejected product is
    /// removed again, so no partial restaurant stays visible.
    ///
    /// Returns the number of restaurants imported.
    pub fn import(&self, records: Vec<(Restaurant, Vec<Product>)>) -> Result<usize, StoreError> {
        let mut imported = 0;
        for (restaurant, products) in records {
            let (slug, restaurant_id) = (restaurant.slug.clone(), restaurant.id);
            match self.insert_restaurant(restaurant) {
                Ok(()) => {}
                Err(StoreError::Duplicate(key)) => {
                    info!(%slug, %key, "Skipping already present restaurant");
                    continue;
                }
                Err(e) => return Err(e),
            }
            if let Err(e) = products
                .into_iter()
                .try_for_each(|product| self.insert_product(product))
            {
                self.restaurants.remove(&slug);
                self.products.remove(&restaurant_id);
                return Err(e);
            }
            imported += 1;
        }
        Ok(imported)
    }

    pub fn restaurant_count(&self) -> usize {
        self.restaurants.len()
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn find_restaurant_by_slug(&self, slug: &str) -> Result<Option<Restaurant>, StoreError> {
        Ok(self.restaurants.get(slug).map(|entry| entry.value().clone()))
    }

    async fn list_products(&self, restaurant_id: Uuid) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .products
            .get(&restaurant_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}
