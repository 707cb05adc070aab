//! Price list and quote handlers.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;
use woodora_core::{FurnitureSpec, Price, PriceBreakdown, PricingCatalog, compute_price};

use crate::error::Result;
use crate::state::AppState;

/// A priced customization.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(flatten)]
    pub breakdown: PriceBreakdown,
    pub unit_price: Decimal,
    /// Total formatted for display, e.g. `₹35,622.08`.
    pub formatted_total: String,
}

impl Quote {
    /// Validate and price `spec` against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Spec` for out-of-range input and `AppError::Pricing`
    /// when a selection is not in the price list.
    pub fn price(spec: &FurnitureSpec, catalog: &PricingCatalog) -> Result<Self> {
        spec.validate()?;
        let breakdown = compute_price(spec, catalog)?;
        Ok(Self {
            unit_price: breakdown.unit_price(),
            formatted_total: Price::from_amount(breakdown.total).display(),
            breakdown,
        })
    }
}

/// The price list used for quotes.
#[instrument(skip(state))]
pub async fn catalog(State(state): State<AppState>) -> Json<PricingCatalog> {
    Json(state.pricing().clone())
}

/// Price a customization without touching the cart.
#[instrument(skip(state))]
pub async fn quote(
    State(state): State<AppState>,
    Json(spec): Json<FurnitureSpec>,
) -> Result<Json<Quote>> {
    let quote = Quote::price(&spec, state.pricing())?;
    tracing::debug!(total = %quote.breakdown.total, "quoted");
    Ok(Json(quote))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use woodora_core::Dimensions;

    use super::*;
    use crate::error::AppError;

    fn spec(material: &str, width: i64) -> FurnitureSpec {
        FurnitureSpec {
            category: "chair".to_string(),
            material: material.to_string(),
            dimensions: Dimensions::from_inches(width, 36, 24),
            finish: "natural".to_string(),
            color: "walnut".to_string(),
            quantity: 1,
        }
    }

    #[test]
    fn test_quote_oak_chair() {
        let quote = Quote::price(&spec("oak", 24), &PricingCatalog::woodora()).unwrap();
        assert_eq!(quote.breakdown.total.to_string(), "35622.08");
        assert_eq!(quote.unit_price, quote.breakdown.total);
        assert_eq!(quote.formatted_total, "₹35,622.08");
    }

    #[test]
    fn test_quote_rejects_bad_input() {
        let err = Quote::price(&spec("oak", 0), &PricingCatalog::woodora()).unwrap_err();
        assert!(matches!(err, AppError::Spec(_)));

        let err = Quote::price(&spec("bamboo", 24), &PricingCatalog::woodora()).unwrap_err();
        assert!(matches!(err, AppError::Pricing(_)));
    }

    #[test]
    fn test_quote_serializes_camel_case() {
        let quote = Quote::price(&spec("oak", 24), &PricingCatalog::woodora()).unwrap();
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["materialCost"], "622.08");
        assert_eq!(json["unitPrice"], "35622.08");
        assert!(json.get("formattedTotal").is_some());
    }
}
