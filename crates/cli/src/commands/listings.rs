//! Catalog management commands.
//!
//! # Usage
//!
//! ```bash
//! woodora listings list --search oak
//! woodora listings list --all
//! woodora listings seed --force
//! woodora listings delete FURN-001
//! ```
//!
//! # Environment Variables
//!
//! - `WOODORA_DATA_DIR` - Directory holding `furniture.json`

use std::fmt::Write as _;

use thiserror::Error;
use woodora_core::{FurnitureListing, ListingFilter, Price};
use woodora_storefront::db::{ListingRepository, RepositoryError, listings::sample_listings};

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum ListingsError {
    /// Reading or writing the catalog failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// No listing has the given ID.
    #[error("Listing not found: {0}")]
    NotFound(String),
}

/// Render listings as a table. Without `all`, only active listings
/// matching `filter` are shown, newest first.
///
/// # Errors
///
/// Returns `ListingsError::Repository` if the catalog cannot be read.
pub async fn list(
    repo: &ListingRepository,
    filter: &ListingFilter,
    all: bool,
) -> Result<String, ListingsError> {
    let listings = if all {
        repo.find_all().await?
    } else {
        let active = repo.list_active().await?;
        filter.apply(&active).into_iter().cloned().collect()
    };
    Ok(render(&listings))
}

/// Add the demo listings.
///
/// Skips seeding if the catalog already has listings, unless `force` is set.
///
/// # Errors
///
/// Returns `ListingsError::Repository` if the catalog cannot be read or written.
pub async fn seed(repo: &ListingRepository, force: bool) -> Result<usize, ListingsError> {
    let existing = repo.find_all().await?.len();
    if existing > 0 && !force {
        tracing::info!(existing, "Catalog already has listings, skipping (use --force)");
        return Ok(0);
    }

    let mut created = 0;
    for new in sample_listings() {
        let listing = repo.create(new).await?;
        tracing::info!(id = %listing.id, name = %listing.name, "Seeded listing");
        created += 1;
    }

    tracing::info!(created, path = %repo.path().display(), "Seeding complete");
    Ok(created)
}

/// Delete a listing by ID.
///
/// # Errors
///
/// Returns `ListingsError::NotFound` if no listing has the ID.
pub async fn delete(repo: &ListingRepository, id: &str) -> Result<(), ListingsError> {
    if !repo.delete(id).await? {
        return Err(ListingsError::NotFound(id.to_string()));
    }
    tracing::info!(id, "Deleted listing");
    Ok(())
}

fn render(listings: &[FurnitureListing]) -> String {
    if listings.is_empty() {
        return "No listings.".to_string();
    }

    let mut out = String::new();
    for l in listings {
        let _ = writeln!(
            out,
            "{:<38} {:<32} {:<10} {:<9} {:>14} {:>4}  {}",
            l.id.as_str(),
            l.name,
            l.category,
            l.material,
            Price::from_amount(l.price).display(),
            l.stock,
            l.status.as_str(),
        );
        let _ = writeln!(out, "{:<38} {}", "", l.dimensions.display());
    }
    let _ = write!(out, "{} listing(s)", listings.len());
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use woodora_core::{ListingPatch, ListingStatus};

    use super::*;

    #[tokio::test]
    async fn test_seed_once() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ListingRepository::new(dir.path());

        assert_eq!(seed(&repo, false).await.unwrap(), 2);
        assert_eq!(seed(&repo, false).await.unwrap(), 0);
        assert_eq!(seed(&repo, true).await.unwrap(), 2);
        assert_eq!(repo.find_all().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_list_filters_and_all() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ListingRepository::new(dir.path());
        seed(&repo, false).await.unwrap();

        let filter = ListingFilter {
            search: Some("teak".to_string()),
            ..ListingFilter::default()
        };
        let output = list(&repo, &filter, false).await.unwrap();
        assert!(output.contains("Teak Wood Bookshelf"));
        assert!(!output.contains("Oak Dining Table"));
        assert!(output.ends_with("1 listing(s)"));

        let table = repo.find_all().await.unwrap()[0].id.clone();
        let patch = ListingPatch {
            status: Some(ListingStatus::Draft),
            ..ListingPatch::default()
        };
        repo.update(table.as_str(), patch).await.unwrap();

        let active = list(&repo, &ListingFilter::default(), false).await.unwrap();
        assert!(active.ends_with("1 listing(s)"));
        let everything = list(&repo, &ListingFilter::default(), true).await.unwrap();
        assert!(everything.ends_with("2 listing(s)"));
    }

    #[tokio::test]
    async fn test_delete_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ListingRepository::new(dir.path());
        let err = delete(&repo, "FURN-404").await.unwrap_err();
        assert!(matches!(err, ListingsError::NotFound(_)));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]), "No listings.");
    }
}
