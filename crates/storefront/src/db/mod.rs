//! Local file storage for the storefront.
//!
//! # Layout under the data directory
//!
//! - `furniture.json` - The ready-made listing catalog, one JSON array
//! - `carts/` - One JSON file per cart key
//!
//! The catalog can be seeded with:
//! ```bash
//! cargo run -p woodora-cli -- listings seed
//! ```

pub mod kv;
pub mod listings;

pub use kv::FileStore;
pub use listings::ListingRepository;

use thiserror::Error;
use woodora_core::listing::ListingError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing the catalog file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A submitted listing failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ListingError),
}
