//! Core types for Woodora.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod dimensions;
pub mod id;
pub mod price;
pub mod spec;
pub mod status;

pub use dimensions::{Dimensions, feet_and_inches};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use spec::{FurnitureSpec, SpecError};
pub use status::ListingStatus;
