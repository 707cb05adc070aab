//! Price a customization from the command line.
//!
//! # Usage
//!
//! ```bash
//! woodora quote -c sofa -m teak -f lacquered --width 84 --height 34 --depth 38 -q 2
//! ```

use thiserror::Error;
use woodora_core::{
    FurnitureSpec, Price, PriceBreakdown, PricingCatalog, PricingError, SpecError, compute_price,
};

/// Errors from the quote command.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The customization is out of range.
    #[error("invalid customization: {0}")]
    Spec(#[from] SpecError),

    /// A selection is not in the price list.
    #[error("{0}")]
    Pricing(#[from] PricingError),

    /// The breakdown could not be encoded.
    #[error("failed to encode breakdown: {0}")]
    Json(#[from] serde_json::Error),
}

/// Price `spec` and render the breakdown as text or JSON.
///
/// # Errors
///
/// Returns `QuoteError` if the customization is invalid or cannot be priced.
pub fn run(spec: &FurnitureSpec, catalog: &PricingCatalog, json: bool) -> Result<String, QuoteError> {
    spec.validate()?;
    let breakdown = compute_price(spec, catalog)?;
    tracing::debug!(total = %breakdown.total, "priced customization");

    if json {
        return Ok(serde_json::to_string_pretty(&breakdown)?);
    }
    Ok(render(spec, catalog, &breakdown))
}

fn render(spec: &FurnitureSpec, catalog: &PricingCatalog, breakdown: &PriceBreakdown) -> String {
    let money = |amount| Price::from_amount(amount).display();
    let label = catalog
        .category(&spec.category)
        .map_or(spec.category.as_str(), |c| c.label.as_str());

    let mut lines = vec![
        format!("{label} in {} ({} finish)", spec.material, spec.finish),
        format!("Dimensions:    {}", spec.dimensions.display()),
        format!("Base cost:     {}", money(breakdown.base_cost)),
        format!("Material cost: {}", money(breakdown.material_cost)),
        format!("Labor cost:    {}", money(breakdown.labor_cost)),
        format!("Finish cost:   {}", money(breakdown.finish_cost)),
    ];
    if spec.quantity > 1 {
        lines.push(format!("Unit price:    {}", money(breakdown.unit_price())));
        lines.push(format!("Quantity:      {}", spec.quantity));
    }
    lines.push(format!("Total:         {}", money(breakdown.total)));
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use woodora_core::Dimensions;

    use super::*;

    fn chair(quantity: u32) -> FurnitureSpec {
        FurnitureSpec {
            category: "chair".to_string(),
            material: "oak".to_string(),
            dimensions: Dimensions::from_inches(24, 36, 24),
            finish: "natural".to_string(),
            color: String::new(),
            quantity,
        }
    }

    #[test]
    fn test_text_output() {
        let output = run(&chair(1), &PricingCatalog::woodora(), false).unwrap();
        assert!(output.contains("Material cost: ₹622.08"));
        assert!(output.contains("Total:         ₹35,622.08"));
        assert!(!output.contains("Unit price"));
    }

    #[test]
    fn test_text_output_with_quantity() {
        let output = run(&chair(2), &PricingCatalog::woodora(), false).unwrap();
        assert!(output.contains("Unit price:    ₹35,622.08"));
        assert!(output.contains("Total:         ₹71,244.16"));
    }

    #[test]
    fn test_json_output() {
        let output = run(&chair(1), &PricingCatalog::woodora(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total"], "35622.08");
    }

    #[test]
    fn test_unknown_material() {
        let mut spec = chair(1);
        spec.material = "bamboo".to_string();
        let err = run(&spec, &PricingCatalog::woodora(), false).unwrap_err();
        assert!(matches!(err, QuoteError::Pricing(PricingError::UnknownMaterial(_))));
    }
}
