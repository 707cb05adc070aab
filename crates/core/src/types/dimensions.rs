//! Furniture dimensions in inches.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const INCHES_PER_FOOT: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Width, height and depth of a piece, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Dimensions {
    pub width: Decimal,
    pub height: Decimal,
    pub depth: Decimal,
}

impl Dimensions {
    /// Create dimensions from whole inches.
    #[must_use]
    pub fn from_inches(width: i64, height: i64, depth: i64) -> Self {
        Self {
            width: Decimal::from(width),
            height: Decimal::from(height),
            depth: Decimal::from(depth),
        }
    }

    /// All-zero dimensions, used when a record cannot be decoded.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            width: Decimal::ZERO,
            height: Decimal::ZERO,
            depth: Decimal::ZERO,
        }
    }

    /// Volume in cubic inches, or `None` if the product overflows.
    #[must_use]
    pub fn volume(&self) -> Option<Decimal> {
        self.width
            .checked_mul(self.height)?
            .checked_mul(self.depth)
    }

    /// Whether every side is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.width > Decimal::ZERO && self.height > Decimal::ZERO && self.depth > Decimal::ZERO
    }

    /// Human-readable size, e.g. `6' × 3' × 2' 6"`.
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{} × {} × {}",
            feet_and_inches(self.width),
            feet_and_inches(self.height),
            feet_and_inches(self.depth)
        )
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Render a length in inches as feet and inches (`2' 6"`, `6'`, `11"`).
#[must_use]
pub fn feet_and_inches(inches: Decimal) -> String {
    let feet = (inches / INCHES_PER_FOOT).floor();
    let remaining = (inches % INCHES_PER_FOOT).normalize();

    if feet.is_zero() {
        format!("{remaining}\"")
    } else if remaining.is_zero() {
        format!("{}'", feet.normalize())
    } else {
        format!("{}' {remaining}\"", feet.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume() {
        let dims = Dimensions::from_inches(24, 36, 24);
        assert_eq!(dims.volume(), Some(Decimal::from(20_736)));

        let huge = Dimensions {
            width: Decimal::MAX,
            height: Decimal::from(2),
            depth: Decimal::ONE,
        };
        assert_eq!(huge.volume(), None);
    }

    #[test]
    fn test_is_positive() {
        assert!(Dimensions::from_inches(1, 1, 1).is_positive());
        assert!(!Dimensions::from_inches(0, 36, 30).is_positive());
        assert!(!Dimensions::zero().is_positive());
    }

    #[test]
    fn test_feet_and_inches() {
        assert_eq!(feet_and_inches(Decimal::from(72)), "6'");
        assert_eq!(feet_and_inches(Decimal::from(30)), "2' 6\"");
        assert_eq!(feet_and_inches(Decimal::from(11)), "11\"");
        assert_eq!(feet_and_inches(Decimal::ZERO), "0\"");
    }

    #[test]
    fn test_display() {
        let dims = Dimensions::from_inches(72, 36, 30);
        assert_eq!(dims.to_string(), "6' × 3' × 2' 6\"");
    }
}
