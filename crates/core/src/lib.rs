//! Woodora Core - Pricing, cart and catalog domain library.
//!
//! This crate provides the domain logic shared by all Woodora components:
//! - `storefront` - JSON storefront service
//! - `cli` - Command-line tools for quotes and catalog management
//!
//! # Architecture
//!
//! The core crate contains types, pure calculations and the storage trait -
//! no network I/O and no filesystem access. Persistence is injected through
//! [`storage::KeyValueStore`] so the same cart logic runs against memory,
//! files, or a store that is switched off.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices, dimensions, the furniture spec and statuses
//! - [`pricing`] - Price estimation against an explicit [`pricing::PricingCatalog`]
//! - [`cart`] - Persisted cart with derived totals
//! - [`listing`] - Ready-made listings and the catalog record decode step
//! - [`filter`] - Public catalog search and filter facets
//! - [`storage`] - Key-value persistence capability

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod filter;
pub mod listing;
pub mod pricing;
pub mod storage;
pub mod types;

pub use cart::{CartItem, CartState, CartStore, NewCartItem};
pub use filter::{Facets, ListingFilter, facets};
pub use listing::{Decoded, FurnitureListing, ListingPatch, ListingRecord, Model3d, NewListing};
pub use pricing::{PriceBreakdown, PricingCatalog, PricingError, compute_price};
pub use storage::{DisabledStore, KeyValueStore, MemoryStore};
pub use types::*;
