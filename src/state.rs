//! Application State
//!
//! This module builds the state shared by every handler: the entity store,
//! the image allow-list and the location of the static assets.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{info, warn};

use crate::config::Config;
use crate::error::StartupError;
use crate::store::{EntityStore, InMemoryStore, Seed, SqliteStore};
use crate::view::ImageHostAllowList;

/// Name of the seed document looked up inside the assets directory
pub const DEFAULT_SEED_FILE: &str = "seed.json";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state
pub struct AppState {
    /// Read-only entity store behind the narrow query trait.
    pub store: Arc<dyn EntityStore>,

    /// Hosts images may be rendered from.
    pub images: ImageHostAllowList,

    /// Directory served under `/assets`.
    pub assets_dir: PathBuf,
}

impl AppState {
    /// Creates the state around an already populated store and locates the
    /// assets directory.
    pub fn new(store: Arc<dyn EntityStore>, images: ImageHostAllowList) -> Self {
        Self {
            store,
            images,
            assets_dir: Self::current_assets_directory(),
        }
    }

    /// Opens the configured store, imports the seed file and builds the state.
    ///
    /// `DATABASE_URL` selects SQLite; without it an in-memory store is used.
    /// The seed is `SEED_FILE` when set, else `<assets>/seed.json` when that
    /// file exists.
    pub async fn from_config(config: &Config) -> Result<Self, StartupError> {
        let assets_dir = Self::current_assets_directory();

        let seed_path = config
            .seed_file
            .clone()
            .or_else(|| Some(assets_dir.join(DEFAULT_SEED_FILE)).filter(|p| p.exists()));

        let records = match &seed_path {
            Some(path) => {
                info!("Loading seed file {}", path.display());
                Seed::from_file(path).await?.into_records()
            }
            None => {
                warn!("No seed file found, starting with an empty store");
                Vec::new()
            }
        };

        let store: Arc<dyn EntityStore> = match &config.database_url {
            Some(url) => {
                let store = SqliteStore::connect(url).await?;
                let imported = store.import(records).await?;
                info!(imported, "Seeded SQLite store");
                Arc::new(store)
            }
            None => {
                let store = InMemoryStore::new();
                let imported = store.import(records)?;
                info!(imported, "Seeded in-memory store");
                Arc::new(store)
            }
        };

        Ok(Self {
            store,
            images: ImageHostAllowList::new(&config.image_hosts),
            assets_dir,
        })
    }

    fn current_assets_directory() -> PathBuf {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let assets_dir = Self::locate_assets_directory(&current_dir);

        info!("Using assets directory: {:?}", assets_dir);
        assets_dir
    }

    /// Attempts to locate the assets directory using a multi-step strategy
    fn locate_assets_directory(current_dir: &Path) -> PathBuf {
        // 1. ./assets
        // 2. ../assets (if running from a subdir)
        // 3. Fallback to "assets" relative path

        if current_dir.join("assets").exists() {
            return current_dir.join("assets");
        }

        if let Some(parent) = current_dir.parent() {
            if parent.join("assets").exists() {
                return parent.join("assets");
            }
        }

        PathBuf::from("assets")
    }
}
