//! Public catalog filtering.

use serde::{Deserialize, Serialize};

use crate::listing::FurnitureListing;

/// Filter value that disables a category or material criterion.
pub const ALL: &str = "all";

/// Shopper-supplied catalog filters.
///
/// Only `Active` listings are ever returned, regardless of criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    /// Case-insensitive substring matched against name, category or material.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact category, or `"all"`.
    #[serde(default)]
    pub category: Option<String>,
    /// Exact material, or `"all"`.
    #[serde(default)]
    pub material: Option<String>,
}

impl ListingFilter {
    /// Whether `listing` is visible under this filter.
    #[must_use]
    pub fn matches(&self, listing: &FurnitureListing) -> bool {
        if !listing.status.is_active() {
            return false;
        }

        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            let hit = [&listing.name, &listing.category, &listing.material]
                .iter()
                .any(|field| field.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }

        exact(self.category.as_deref(), &listing.category)
            && exact(self.material.as_deref(), &listing.material)
    }

    /// The matching listings, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, listings: &'a [FurnitureListing]) -> Vec<&'a FurnitureListing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }
}

fn exact(criterion: Option<&str>, value: &str) -> bool {
    match criterion {
        None | Some("" | ALL) => true,
        Some(wanted) => wanted == value,
    }
}

/// Dropdown values for the catalog filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub categories: Vec<String>,
    pub materials: Vec<String>,
}

/// Distinct categories and materials in first-seen order, each prefixed with
/// `"all"`.
#[must_use]
pub fn facets(listings: &[FurnitureListing]) -> Facets {
    fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
        let mut out = vec![ALL.to_owned()];
        for v in values {
            if !out.contains(v) {
                out.push(v.clone());
            }
        }
        out
    }

    Facets {
        categories: distinct(listings.iter().map(|l| &l.category)),
        materials: distinct(listings.iter().map(|l| &l.material)),
    }
}
