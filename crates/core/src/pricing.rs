//! Price estimation for custom furniture.
//!
//! The calculator is a pure function of a [`FurnitureSpec`] and the
//! [`PricingCatalog`] it is priced against:
//!
//! ```text
//! base      = category base price
//! volume    = (width * height * depth) / 10000
//! material  = base * material multiplier * volume * 0.01
//! labor     = base * 0.4
//! finish    = finish surcharge
//! total     = (base + material + labor + finish) * quantity
//! ```
//!
//! Labor is a flat share of the base price and does not depend on size or
//! material.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::FurnitureSpec;

/// Cubic inches per unit of volume multiplier.
const VOLUME_DIVISOR: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);
/// Scale applied to the material cost (0.01).
const MATERIAL_SCALE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
/// Labor as a fraction of the base price (0.4).
const LABOR_FRACTION: Decimal = Decimal::from_parts(4, 0, 0, false, 1);

/// Errors that withhold a price.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// The category slug is not in the catalog.
    #[error("unknown furniture category: {0}")]
    UnknownCategory(String),
    /// The material slug is not in the catalog.
    #[error("unknown material: {0}")]
    UnknownMaterial(String),
    /// The finish slug is not in the catalog.
    #[error("unknown finish: {0}")]
    UnknownFinish(String),
    /// Decimal arithmetic overflowed (absurd dimensions).
    #[error("price exceeds representable range")]
    Overflow,
}

impl PricingError {
    /// Whether the error means the request is missing a catalog selection.
    #[must_use]
    pub const fn is_incomplete_spec(&self) -> bool {
        !matches!(self, Self::Overflow)
    }
}

/// Itemized cost of a customization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_cost: Decimal,
    pub material_cost: Decimal,
    pub labor_cost: Decimal,
    pub finish_cost: Decimal,
    pub total: Decimal,
}

impl PriceBreakdown {
    /// Price of a single piece (sum of the components).
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.base_cost + self.material_cost + self.labor_cost + self.finish_cost
    }
}

/// A furniture category and its fixed base price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRate {
    pub value: String,
    pub label: String,
    pub base_price: Decimal,
}

/// A wood type and its cost multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRate {
    pub value: String,
    pub label: String,
    pub multiplier: Decimal,
}

/// A finish and its fixed surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishRate {
    pub value: String,
    pub label: String,
    pub surcharge: Decimal,
}

/// A selectable color. Display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub value: String,
    pub label: String,
}

/// Lookup tables the calculator prices against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PricingCatalog {
    pub categories: Vec<CategoryRate>,
    pub materials: Vec<MaterialRate>,
    pub finishes: Vec<FinishRate>,
    #[serde(default)]
    pub colors: Vec<ColorOption>,
}

impl PricingCatalog {
    /// The storefront's standard price list.
    #[must_use]
    pub fn woodora() -> Self {
        let category = |value: &str, label: &str, base: i64| CategoryRate {
            value: value.to_owned(),
            label: label.to_owned(),
            base_price: Decimal::from(base),
        };
        let material = |value: &str, label: &str, tenths: i64| MaterialRate {
            value: value.to_owned(),
            label: label.to_owned(),
            multiplier: Decimal::new(tenths, 1),
        };
        let finish = |value: &str, label: &str, surcharge: i64| FinishRate {
            value: value.to_owned(),
            label: label.to_owned(),
            surcharge: Decimal::from(surcharge),
        };
        let color = |value: &str, label: &str| ColorOption {
            value: value.to_owned(),
            label: label.to_owned(),
        };

        Self {
            categories: vec![
                category("sofa", "Sofa", 65_000),
                category("chair", "Chair", 25_000),
                category("table", "Table", 40_000),
                category("bed", "Bed", 95_000),
                category("dresser", "Dresser", 48_000),
                category("bookshelf", "Bookshelf", 32_000),
            ],
            materials: vec![
                material("oak", "Oak Wood", 12),
                material("pine", "Pine Wood", 8),
                material("mahogany", "Mahogany", 18),
                material("teak", "Teak Wood", 22),
                material("walnut", "Walnut Wood", 19),
                material("maple", "Maple Wood", 14),
            ],
            finishes: vec![
                finish("natural", "Natural", 0),
                finish("stained", "Stained", 4_000),
                finish("painted", "Painted", 6_000),
                finish("lacquered", "Lacquered", 8_000),
            ],
            colors: vec![
                color("natural", "Natural Wood"),
                color("brown", "Rich Brown"),
                color("black", "Ebony Black"),
                color("white", "Antique White"),
                color("gray", "Weathered Gray"),
                color("cherry", "Cherry Red"),
            ],
        }
    }

    /// Look up a category by slug.
    #[must_use]
    pub fn category(&self, value: &str) -> Option<&CategoryRate> {
        self.categories.iter().find(|c| c.value == value)
    }

    /// Look up a material by slug.
    #[must_use]
    pub fn material(&self, value: &str) -> Option<&MaterialRate> {
        self.materials.iter().find(|m| m.value == value)
    }

    /// Look up a finish by slug.
    #[must_use]
    pub fn finish(&self, value: &str) -> Option<&FinishRate> {
        self.finishes.iter().find(|f| f.value == value)
    }
}

/// Price a customization against a catalog.
///
/// # Errors
///
/// Returns `PricingError::UnknownCategory`, `UnknownMaterial` or
/// `UnknownFinish` when a selection cannot be resolved; no price is computed
/// from defaults. Returns `PricingError::Overflow` only for dimensions far
/// outside anything [`FurnitureSpec::validate`] accepts.
pub fn compute_price(
    spec: &FurnitureSpec,
    catalog: &PricingCatalog,
) -> Result<PriceBreakdown, PricingError> {
    let category = catalog
        .category(&spec.category)
        .ok_or_else(|| PricingError::UnknownCategory(spec.category.clone()))?;
    let material = catalog
        .material(&spec.material)
        .ok_or_else(|| PricingError::UnknownMaterial(spec.material.clone()))?;
    let finish = catalog
        .finish(&spec.finish)
        .ok_or_else(|| PricingError::UnknownFinish(spec.finish.clone()))?;

    let volume = spec.dimensions.volume().ok_or(PricingError::Overflow)?;
    let volume_multiplier = volume / VOLUME_DIVISOR;

    let base_cost = category.base_price;
    let material_cost = base_cost
        .checked_mul(material.multiplier)
        .and_then(|v| v.checked_mul(volume_multiplier))
        .and_then(|v| v.checked_mul(MATERIAL_SCALE))
        .ok_or(PricingError::Overflow)?;
    let labor_cost = base_cost * LABOR_FRACTION;
    let finish_cost = finish.surcharge;

    let total = base_cost
        .checked_add(material_cost)
        .and_then(|v| v.checked_add(labor_cost))
        .and_then(|v| v.checked_add(finish_cost))
        .and_then(|v| v.checked_mul(Decimal::from(spec.quantity)))
        .ok_or(PricingError::Overflow)?;

    Ok(PriceBreakdown {
        base_cost: base_cost.normalize(),
        material_cost: material_cost.normalize(),
        labor_cost: labor_cost.normalize(),
        finish_cost: finish_cost.normalize(),
        total: total.normalize(),
    })
}
