//! Furniture customization request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Dimensions;

/// Errors from [`FurnitureSpec::validate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// Quantity outside the orderable range.
    #[error("quantity must be between {min} and {max} (got {got})")]
    QuantityOutOfRange {
        /// Smallest orderable quantity.
        min: u32,
        /// Largest orderable quantity.
        max: u32,
        /// Requested quantity.
        got: u32,
    },
    /// A side is zero or negative.
    #[error("dimensions must be positive")]
    NonPositiveDimensions,
    /// A side exceeds the largest buildable size.
    #[error("each side must be at most {max} inches")]
    DimensionTooLarge {
        /// Largest side, in inches.
        max: u32,
    },
}

/// A complete furniture customization request.
///
/// Category, material, finish and color are slugs (`"chair"`, `"oak"`, ...)
/// resolved against a [`crate::pricing::PricingCatalog`]. Color is
/// display-only and never affects the price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnitureSpec {
    pub category: String,
    pub material: String,
    pub dimensions: Dimensions,
    pub finish: String,
    #[serde(default)]
    pub color: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    FurnitureSpec::MIN_QUANTITY
}

impl FurnitureSpec {
    /// Smallest orderable quantity.
    pub const MIN_QUANTITY: u32 = 1;
    /// Largest orderable quantity per customization.
    pub const MAX_QUANTITY: u32 = 10;
    /// Largest buildable side (100 feet), in inches.
    pub const MAX_SIDE_INCHES: u32 = 1200;

    /// Default size for a new customization (6' x 3' x 2' 6").
    #[must_use]
    pub fn default_dimensions() -> Dimensions {
        Dimensions::from_inches(72, 36, 30)
    }

    /// Check the quantity range and that every side is positive and buildable.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::QuantityOutOfRange`,
    /// `SpecError::NonPositiveDimensions` or `SpecError::DimensionTooLarge`.
    pub fn validate(&self) -> Result<(), SpecError> {
        if !(Self::MIN_QUANTITY..=Self::MAX_QUANTITY).contains(&self.quantity) {
            return Err(SpecError::QuantityOutOfRange {
                min: Self::MIN_QUANTITY,
                max: Self::MAX_QUANTITY,
                got: self.quantity,
            });
        }
        if !self.dimensions.is_positive() {
            return Err(SpecError::NonPositiveDimensions);
        }
        let max = Decimal::from(Self::MAX_SIDE_INCHES);
        let dims = &self.dimensions;
        if dims.width > max || dims.height > max || dims.depth > max {
            return Err(SpecError::DimensionTooLarge {
                max: Self::MAX_SIDE_INCHES,
            });
        }
        Ok(())
    }
}
