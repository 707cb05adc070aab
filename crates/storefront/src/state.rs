//! Application state shared across handlers.

use std::sync::Arc;

use woodora_core::{CartStore, KeyValueStore, PricingCatalog};

use crate::config::StorefrontConfig;
use crate::db::{FileStore, ListingRepository};

/// Directory under the data directory holding cart documents.
pub const CARTS_DIR: &str = "carts";

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the listing repository, the cart store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    listings: ListingRepository,
    carts: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// Create application state with carts persisted under
    /// `<data_dir>/carts`.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let carts = FileStore::open(config.data_dir.join(CARTS_DIR));
        Self::with_cart_store(config, Arc::new(carts))
    }

    /// Create application state with an explicit cart store.
    #[must_use]
    pub fn with_cart_store(config: StorefrontConfig, carts: Arc<dyn KeyValueStore>) -> Self {
        let listings = ListingRepository::new(&config.data_dir);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                listings,
                carts,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the price list used for quotes.
    #[must_use]
    pub fn pricing(&self) -> &PricingCatalog {
        &self.inner.config.pricing
    }

    /// Get a reference to the listing repository.
    #[must_use]
    pub fn listings(&self) -> &ListingRepository {
        &self.inner.listings
    }

    /// The cart stored under `key`.
    #[must_use]
    pub fn cart(&self, key: &str) -> CartStore<Arc<dyn KeyValueStore>> {
        CartStore::with_key(Arc::clone(&self.inner.carts), key)
    }
}
