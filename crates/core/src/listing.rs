//! Ready-made furniture listings and the decode step for catalog records.
//!
//! Records in the catalog file were written by several generations of admin
//! tooling: dimensions and 3D model references appear either as JSON objects
//! or as JSON text inside a string, prices as numbers or numeric strings.
//! [`ListingRecord`] accepts all of that, and [`ListingRecord::decode`] turns
//! it into a strongly typed [`FurnitureListing`], substituting safe defaults
//! for anything it cannot read.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Dimensions, ListingId, ListingStatus};

/// Result of decoding a loosely typed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// The field was read successfully.
    Value(T),
    /// The field was malformed; this is the safe default.
    Fallback(T),
}

impl<T> Decoded<T> {
    /// The decoded value or the fallback.
    pub fn into_inner(self) -> T {
        match self {
            Self::Value(v) | Self::Fallback(v) => v,
        }
    }

    /// Whether decoding fell back to a default.
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Links to 3D model files used by the AR/VR viewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Model3d {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usdz: Option<String>,
}

/// A catalog entry for a pre-made piece available for direct purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnitureListing {
    pub id: ListingId,
    pub name: String,
    pub category: String,
    pub material: String,
    pub dimensions: Dimensions,
    pub finish: String,
    pub color: String,
    pub price: Decimal,
    pub stock: u32,
    pub status: ListingStatus,
    pub images: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model3d: Option<Model3d>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A listing exactly as found in the catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingRecord {
    pub id: ListingId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub dimensions: Value,
    #[serde(default)]
    pub finish: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub stock: Value,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub model3d: Value,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ListingRecord {
    /// Decode into a typed listing, logging every field that fell back.
    #[must_use]
    pub fn decode(self) -> FurnitureListing {
        let dimensions = decode_dimensions(&self.dimensions);
        if dimensions.is_fallback() {
            tracing::warn!(listing_id = %self.id, "unreadable dimensions, using zero");
        }
        let model3d = decode_model3d(&self.model3d);
        if model3d.is_fallback() {
            tracing::warn!(listing_id = %self.id, "unreadable model3d, dropping it");
        }

        FurnitureListing {
            name: self.name,
            category: self.category,
            material: self.material,
            dimensions: dimensions.into_inner(),
            finish: self.finish,
            color: self.color,
            price: decode_number(&self.price).into_inner(),
            stock: decode_count(&self.stock),
            // A record without a status was never published.
            status: self
                .status
                .map_or_else(|| ListingStatus::Other(String::new()), ListingStatus::from),
            images: self.images,
            description: self.description,
            model3d: model3d.into_inner(),
            created_at: decode_timestamp(self.created_at.as_deref()),
            updated_at: decode_timestamp(self.updated_at.as_deref()),
            id: self.id,
        }
    }
}

/// Highest price an admin may set on a listing (₹10 crore).
pub const MAX_LISTING_PRICE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Errors from admin listing submissions.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// A required field is empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The price is negative or above [`MAX_LISTING_PRICE`].
    #[error("price must be between 0 and 100000000, got {0}")]
    InvalidPrice(Decimal),
}

fn check_price(price: Decimal) -> Result<Decimal, ListingError> {
    if price.is_sign_negative() || price > MAX_LISTING_PRICE {
        return Err(ListingError::InvalidPrice(price));
    }
    Ok(price)
}

/// An admin submission for a new listing.
///
/// Dimensions, price and stock are taken as loosely typed JSON since admin
/// forms send them as text.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct NewListing {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub dimensions: Value,
    #[serde(default)]
    pub finish: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub stock: Value,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub model3d: Value,
}

impl NewListing {
    /// Build an `Active` listing with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::MissingField` if `name` or `category` is blank,
    /// or `ListingError::InvalidPrice` if the price is out of range.
    pub fn into_listing(self, now: DateTime<Utc>) -> Result<FurnitureListing, ListingError> {
        if self.name.trim().is_empty() {
            return Err(ListingError::MissingField("name"));
        }
        if self.category.trim().is_empty() {
            return Err(ListingError::MissingField("category"));
        }
        let price = check_price(decode_number(&self.price).into_inner())?;

        Ok(FurnitureListing {
            id: ListingId::generate(),
            name: self.name,
            category: self.category,
            material: self.material,
            dimensions: decode_dimensions(&self.dimensions).into_inner(),
            finish: self.finish,
            color: self.color,
            price,
            stock: decode_count(&self.stock),
            status: ListingStatus::Active,
            images: self.images,
            description: self.description,
            model3d: decode_model3d(&self.model3d).into_inner(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// A partial update to an existing listing. Absent fields are left alone.
///
/// Dimensions go through [`decode_dimensions`], so they may be an object or
/// JSON text like on create.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListingPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub material: Option<String>,
    pub dimensions: Option<Value>,
    pub finish: Option<String>,
    pub color: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub status: Option<ListingStatus>,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
    pub model3d: Option<Model3d>,
}

impl ListingPatch {
    /// Merge the present fields into `listing` and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::InvalidPrice` if the new price is out of
    /// range; `listing` is left untouched.
    pub fn apply(
        self,
        listing: &mut FurnitureListing,
        now: DateTime<Utc>,
    ) -> Result<(), ListingError> {
        fn set<T>(field: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *field = v;
            }
        }

        let price = self.price.map(check_price).transpose()?;
        let dimensions = self.dimensions.map(|raw| {
            let decoded = decode_dimensions(&raw);
            if decoded.is_fallback() {
                tracing::warn!(listing_id = %listing.id, "unreadable dimensions, using zero");
            }
            decoded.into_inner()
        });

        set(&mut listing.name, self.name);
        set(&mut listing.category, self.category);
        set(&mut listing.material, self.material);
        set(&mut listing.dimensions, dimensions);
        set(&mut listing.finish, self.finish);
        set(&mut listing.color, self.color);
        set(&mut listing.price, price);
        set(&mut listing.stock, self.stock);
        set(&mut listing.status, self.status);
        set(&mut listing.images, self.images);
        set(&mut listing.description, self.description);
        if self.model3d.is_some() {
            listing.model3d = self.model3d;
        }
        listing.updated_at = now;
        Ok(())
    }
}

/// Decode dimensions given as an object or as JSON text.
///
/// Individual sides that are missing or not numeric become zero; anything
/// that is not an object (or text encoding one) falls back to zero on all
/// sides.
#[must_use]
pub fn decode_dimensions(value: &Value) -> Decoded<Dimensions> {
    match value {
        Value::Object(map) => Decoded::Value(Dimensions {
            width: map.get("width").map_or(Decimal::ZERO, |v| decode_number(v).into_inner()),
            height: map.get("height").map_or(Decimal::ZERO, |v| decode_number(v).into_inner()),
            depth: map.get("depth").map_or(Decimal::ZERO, |v| decode_number(v).into_inner()),
        }),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(inner @ Value::Object(_)) => decode_dimensions(&inner),
            _ => Decoded::Fallback(Dimensions::zero()),
        },
        _ => Decoded::Fallback(Dimensions::zero()),
    }
}

/// Decode 3D model references given as an object or as JSON text.
#[must_use]
pub fn decode_model3d(value: &Value) -> Decoded<Option<Model3d>> {
    match value {
        Value::Null => Decoded::Value(None),
        Value::Object(_) => serde_json::from_value(value.clone())
            .map_or(Decoded::Fallback(None), |m| Decoded::Value(Some(m))),
        Value::String(text) => serde_json::from_str::<Model3d>(text)
            .map_or(Decoded::Fallback(None), |m| Decoded::Value(Some(m))),
        _ => Decoded::Fallback(None),
    }
}

/// Decode a number given as JSON number or numeric text; zero otherwise.
#[must_use]
pub fn decode_number(value: &Value) -> Decoded<Decimal> {
    let parse = |text: &str| {
        let text = text.trim();
        text.parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
    };

    let parsed = match value {
        Value::Null => return Decoded::Value(Decimal::ZERO),
        Value::Number(n) => parse(&n.to_string()),
        Value::String(s) if s.trim().is_empty() => return Decoded::Value(Decimal::ZERO),
        Value::String(s) => parse(s),
        _ => None,
    };

    parsed.map_or(Decoded::Fallback(Decimal::ZERO), Decoded::Value)
}

/// Decode a non-negative whole count, truncating fractions.
fn decode_count(value: &Value) -> u32 {
    decode_number(value).into_inner().trunc().to_u32().unwrap_or(0)
}

fn decode_timestamp(value: Option<&str>) -> DateTime<Utc> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map_or_else(DateTime::<Utc>::default, |dt| dt.with_timezone(&Utc))
}
