//! SQLite entity store
//!
//! Persistent backend built on an `sqlx` connection pool. Identifiers are
//! stored as text, prices as their exact decimal string and ingredients as a
//! JSON array.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE restaurants (
//!     id TEXT PRIMARY KEY NOT NULL,
//!     slug TEXT NOT NULL UNIQUE,
//!     name TEXT NOT NULL,
//!     description TEXT NOT NULL DEFAULT '',
//!     avatar_image_url TEXT NOT NULL,
//!     cover_image_url TEXT NOT NULL DEFAULT ''
//! );
//!
//! CREATE TABLE products (
//!     id TEXT PRIMARY KEY NOT NULL,
//!     restaurant_id TEXT NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
//!     name TEXT NOT NULL,
//!     description TEXT NOT NULL,
//!     price TEXT NOT NULL,
//!     image_url TEXT NOT NULL,
//!     ingredients TEXT NOT NULL DEFAULT '[]'
//! );
//! ```

use std::str::FromStr;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions},
    FromRow,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::{validate_product, validate_restaurant, EntityStore, StoreError};
use crate::menu::models::Product;
use crate::restaurant::models::Restaurant;

/// Schema statements, applied in order and idempotent.
const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS restaurants (
        id TEXT PRIMARY KEY NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        avatar_image_url TEXT NOT NULL,
        cover_image_url TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS products (
        id TEXT PRIMARY KEY NOT NULL,
        restaurant_id TEXT NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        price TEXT NOT NULL,
        image_url TEXT NOT NULL,
        ingredients TEXT NOT NULL DEFAULT '[]'
    )",
    "CREATE INDEX IF NOT EXISTS idx_products_restaurant_id ON products(restaurant_id)",
];

const MAX_CONNECTIONS: u32 = 5;

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(Debug, FromRow)]
struct RestaurantRow {
    id: String,
    slug: String,
    name: String,
    description: String,
    avatar_image_url: String,
    cover_image_url: String,
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    restaurant_id: String,
    name: String,
    description: String,
    price: String,
    image_url: String,
    ingredients: String,
}

fn parse_id(raw: &str, column: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw)
        .map_err(|e| StoreError::InvalidRecord(format!("{column} {raw:?} is not a UUID: {e}")))
}

impl TryFrom<RestaurantRow> for Restaurant {
    type Error = StoreError;

    fn try_from(row: RestaurantRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(&row.id, "restaurants.id")?,
            slug: row.slug,
            name: row.name,
            description: row.description,
            avatar_image_url: row.avatar_image_url,
            cover_image_url: row.cover_image_url,
        })
    }
}

impl TryFrom<ProductRow> for Product {
    type Error = StoreError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Decimal::from_str(&row.price).map_err(|e| {
            StoreError::InvalidRecord(format!("products.price {:?} is not a decimal: {e}", row.price))
        })?;
        let ingredients = serde_json::from_str(&row.ingredients).map_err(|e| {
            StoreError::InvalidRecord(format!("products.ingredients of {} is not a JSON list: {e}", row.id))
        })?;

        Ok(Self {
            id: parse_id(&row.id, "products.id")?,
            restaurant_id: parse_id(&row.restaurant_id, "products.restaurant_id")?,
            name: row.name,
            description: row.description,
            price,
            image_url: row.image_url,
            ingredients,
        })
    }
}

/// Maps unique-constraint failures to [`StoreError::Duplicate`].
fn map_insert_error(error: sqlx::Error, key: String) -> StoreError {
    match error {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Duplicate(key),
        other => StoreError::Database(other),
    }
}

// =============================================================================
// SQLite Store
// =============================================================================

/// `sqlx`-backed SQLite storage
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `database_url` and applies
    /// the schema.
    ///
    /// An in-memory URL (`sqlite::memory:`) is pinned to a single connection
    /// that is never recycled, since every new connection would see an empty
    /// database.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(MAX_CONNECTIONS)
                .connect_with(options)
                .await?
        };

        info!(database_url, "Connected to SQLite store");

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("SQLite schema is up to date");
        Ok(())
    }

    pub async fn insert_restaurant(&self, restaurant: &Restaurant) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        write_restaurant(&mut *conn, restaurant).await
    }

    pub async fn insert_product(&self, product: &Product) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        write_product(&mut *conn, product).await
    }

    /// Imports seed records. Each restaurant is written together with its
    /// products in one transaction, so a failing product leaves nothing of
    /// that restaurant behind. A restaurant whose slug already exists is
    /// skipped with its products.
    ///
    /// Returns the number of restaurants imported.
    pub async fn import(&self, records: Vec<(Restaurant, Vec<Product>)>) -> Result<usize, StoreError> {
        let mut imported = 0;
        for (restaurant, products) in records {
            let mut tx = self.pool.begin().await?;
            match write_restaurant(&mut *tx, &restaurant).await {
                Ok(()) => {}
                Err(StoreError::Duplicate(key)) => {
                    info!(slug = %restaurant.slug, %key, "Skipping already present restaurant");
                    continue;
                }
                Err(e) => return Err(e),
            }
            for product in &products {
                write_product(&mut *tx, product).await?;
            }
            tx.commit().await?;
            imported += 1;
        }
        Ok(imported)
    }
}

async fn write_restaurant(conn: &mut SqliteConnection, restaurant: &Restaurant) -> Result<(), StoreError> {
    validate_restaurant(restaurant)?;

    sqlx::query(
        "INSERT INTO restaurants (id, slug, name, description, avatar_image_url, cover_image_url)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(restaurant.id.to_string())
    .bind(&restaurant.slug)
    .bind(&restaurant.name)
    .bind(&restaurant.description)
    .bind(&restaurant.avatar_image_url)
    .bind(&restaurant.cover_image_url)
    .execute(conn)
    .await
    .map_err(|e| map_insert_error(e, format!("restaurant {:?}", restaurant.slug)))?;

    Ok(())
}

async fn write_product(conn: &mut SqliteConnection, product: &Product) -> Result<(), StoreError> {
    validate_product(product)?;

    let ingredients = serde_json::to_string(&product.ingredients)
        .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;

    sqlx::query(
        "INSERT INTO products (id, restaurant_id, name, description, price, image_url, ingredients)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(product.id.to_string())
    .bind(product.restaurant_id.to_string())
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price.to_string())
    .bind(&product.image_url)
    .bind(ingredients)
    .execute(conn)
    .await
    .map_err(|e| map_insert_error(e, format!("product id {}", product.id)))?;

    Ok(())
}

#[async_trait]
impl EntityStore for SqliteStore {
    async fn find_restaurant_by_slug(&self, slug: &str) -> Result<Option<Restaurant>, StoreError> {
        sqlx::query_as::<_, RestaurantRow>(
            "SELECT id, slug, name, description, avatar_image_url, cover_image_url
             FROM restaurants WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?
        .map(Restaurant::try_from)
        .transpose()
    }

    async fn list_products(&self, restaurant_id: Uuid) -> Result<Vec<Product>, StoreError> {
        sqlx::query_as::<_, ProductRow>(
            "SELECT id, restaurant_id, name, description, price, image_url, ingredients
             FROM products WHERE restaurant_id = ? ORDER BY rowid",
        )
        .bind(restaurant_id.to_string())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Product::try_from)
        .collect()
    }
}
