//! Status enums for catalog entities.

use serde::{Deserialize, Serialize};

/// Publication status of a furniture listing.
///
/// Only `Active` listings are shown to shoppers. Statuses written by older
/// admin tools that this enum does not know are kept verbatim in `Other` so a
/// listing survives a read/write cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ListingStatus {
    #[default]
    Active,
    Inactive,
    Draft,
    Other(String),
}

impl ListingStatus {
    /// Whether the listing is visible in the public catalog.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// The status as stored in the catalog file.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Draft => "Draft",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ListingStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Active" => Self::Active,
            "Inactive" => Self::Inactive,
            "Draft" => Self::Draft,
            _ => Self::Other(s),
        }
    }
}

impl From<ListingStatus> for String {
    fn from(status: ListingStatus) -> Self {
        match status {
            ListingStatus::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses() {
        assert_eq!(ListingStatus::from("Active".to_string()), ListingStatus::Active);
        assert_eq!(ListingStatus::from("Draft".to_string()), ListingStatus::Draft);
        assert!(ListingStatus::Active.is_active());
        assert!(!ListingStatus::Inactive.is_active());
    }

    #[test]
    fn test_status_is_case_sensitive() {
        let status: ListingStatus = "active".parse().unwrap();
        assert_eq!(status, ListingStatus::Other("active".to_string()));
        assert!(!status.is_active());
    }

    #[test]
    fn test_unknown_status_preserved() {
        let status: ListingStatus = serde_json::from_str("\"Archived\"").unwrap();
        assert_eq!(status.as_str(), "Archived");
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"Archived\"");
    }
}
