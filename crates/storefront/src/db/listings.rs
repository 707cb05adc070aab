//! Listing repository backed by a JSON file.
//!
//! The catalog is a single JSON array in `<data_dir>/furniture.json`. Each
//! operation reads the whole file and, for mutations, writes it back. A
//! mutex serializes access within the process; the file is assumed to have
//! a single writer.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;

use woodora_core::{FurnitureListing, ListingPatch, ListingRecord, NewListing};

use super::RepositoryError;

/// File name of the catalog inside the data directory.
pub const FURNITURE_FILE: &str = "furniture.json";

/// Repository for furniture listings.
#[derive(Debug)]
pub struct ListingRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ListingRepository {
    /// Create a repository for the catalog in `data_dir`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(FURNITURE_FILE),
            lock: Mutex::new(()),
        }
    }

    /// Path of the catalog file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All listings in file order, whatever their status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be read or created,
    /// or `RepositoryError::Serialization` if it is not a JSON array.
    pub async fn find_all(&self) -> Result<Vec<FurnitureListing>, RepositoryError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Get a listing by id.
    ///
    /// # Errors
    ///
    /// Same as [`Self::find_all`].
    pub async fn find_by_id(&self, id: &str) -> Result<Option<FurnitureListing>, RepositoryError> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .find(|l| l.id.as_str() == id))
    }

    /// Active listings, newest first.
    ///
    /// # Errors
    ///
    /// Same as [`Self::find_all`].
    pub async fn list_active(&self) -> Result<Vec<FurnitureListing>, RepositoryError> {
        let mut listings: Vec<_> = self
            .find_all()
            .await?
            .into_iter()
            .filter(|l| l.status.is_active())
            .collect();
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listings)
    }

    /// Validate and append a new listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if name or category is missing,
    /// or an I/O or serialization error from reading or writing the file.
    pub async fn create(&self, new: NewListing) -> Result<FurnitureListing, RepositoryError> {
        let listing = new.into_listing(Utc::now())?;

        let _guard = self.lock.lock().await;
        let mut listings = self.read().await?;
        listings.push(listing.clone());
        self.write(&listings).await?;

        tracing::info!(listing_id = %listing.id, name = %listing.name, "created listing");
        Ok(listing)
    }

    /// Merge `patch` into a listing. Returns `None` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the patch sets an invalid
    /// price, or an I/O or serialization error from reading or writing the
    /// file.
    pub async fn update(
        &self,
        id: &str,
        patch: ListingPatch,
    ) -> Result<Option<FurnitureListing>, RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut listings = self.read().await?;

        let Some(listing) = listings.iter_mut().find(|l| l.id.as_str() == id) else {
            return Ok(None);
        };
        patch.apply(listing, Utc::now())?;
        let updated = listing.clone();

        self.write(&listings).await?;
        tracing::info!(listing_id = %updated.id, "updated listing");
        Ok(Some(updated))
    }

    /// Delete a listing. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialization error from reading or writing the file.
    pub async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let _guard = self.lock.lock().await;
        let listings = self.read().await?;
        let before = listings.len();

        let remaining: Vec<_> = listings
            .into_iter()
            .filter(|l| l.id.as_str() != id)
            .collect();
        if remaining.len() == before {
            return Ok(false);
        }

        self.write(&remaining).await?;
        tracing::info!(listing_id = id, "deleted listing");
        Ok(true)
    }

    async fn read(&self) -> Result<Vec<FurnitureListing>, RepositoryError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.write(&[]).await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let records: Vec<Value> = serde_json::from_str(&text)?;
        let listings = records
            .into_iter()
            .filter_map(|raw| match serde_json::from_value::<ListingRecord>(raw) {
                Ok(record) => Some(record.decode()),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable listing record");
                    None
                }
            })
            .collect();
        Ok(listings)
    }

    async fn write(&self, listings: &[FurnitureListing]) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let text = serde_json::to_string_pretty(listings)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, text).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Demo catalog used by `woodora listings seed`.
#[must_use]
pub fn sample_listings() -> Vec<NewListing> {
    use serde_json::json;

    vec![
        NewListing {
            name: "Modern Oak Dining Table".to_string(),
            category: "table".to_string(),
            material: "oak".to_string(),
            dimensions: json!({"width": 72, "height": 30, "depth": 36}),
            finish: "stained".to_string(),
            color: "brown".to_string(),
            price: json!(45000),
            stock: json!(5),
            images: vec!["/placeholder.svg?height=300&width=400&text=Oak+Table".to_string()],
            description: "Beautiful handcrafted oak dining table perfect for family gatherings."
                .to_string(),
            model3d: Value::Null,
        },
        NewListing {
            name: "Teak Wood Bookshelf".to_string(),
            category: "bookshelf".to_string(),
            material: "teak".to_string(),
            dimensions: json!({"width": 36, "height": 72, "depth": 12}),
            finish: "natural".to_string(),
            color: "natural".to_string(),
            price: json!(32000),
            stock: json!(8),
            images: vec!["/placeholder.svg?height=300&width=400&text=Teak+Bookshelf".to_string()],
            description: "Elegant teak bookshelf with multiple compartments for books and decor."
                .to_string(),
            model3d: Value::Null,
        },
    ]
}
