//! Shopping cart backed by a [`KeyValueStore`].
//!
//! The whole cart is persisted as one JSON document under a single key after
//! every mutation. Aggregates (`total_items`, `total_amount`) are always
//! re-derived from the item list, including when a cart is loaded, so a
//! hand-edited or stale document can never carry inconsistent totals.
//!
//! Invalid mutations (unknown id, non-positive quantity, a total that would
//! overflow) are no-ops that return the current state. Storage failures are logged and otherwise
//! ignored: the returned state is correct even if it was not saved.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::listing::FurnitureListing;
use crate::pricing::PriceBreakdown;
use crate::storage::KeyValueStore;
use crate::types::{CartItemId, FurnitureSpec, ListingId};

/// Storage key for the default cart.
pub const DEFAULT_CART_KEY: &str = "woodora-cart";

/// A priced line in the cart.
///
/// The customization snapshot and prices are fixed when the item is added; only the
/// quantity (and with it `total_price`) changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    #[serde(flatten)]
    pub spec: FurnitureSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<ListingId>,
    pub price_breakdown: PriceBreakdown,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Number of pieces on this line.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.spec.quantity
    }
}

/// An item about to be added; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub spec: FurnitureSpec,
    pub name: Option<String>,
    pub listing_id: Option<ListingId>,
    pub price_breakdown: PriceBreakdown,
    pub unit_price: Decimal,
}

impl NewCartItem {
    /// A customized piece priced by [`crate::pricing::compute_price`].
    #[must_use]
    pub fn from_quote(spec: FurnitureSpec, price_breakdown: PriceBreakdown) -> Self {
        Self {
            unit_price: price_breakdown.unit_price(),
            spec,
            name: None,
            listing_id: None,
            price_breakdown,
        }
    }

    /// One unit of a ready-made listing at its catalog price.
    ///
    /// Listings carry a single price, so the breakdown is a nominal split:
    /// 60% base, 20% material, 15% labor, 5% finish.
    #[must_use]
    pub fn from_listing(listing: &FurnitureListing) -> Self {
        let price = listing.price;
        let share = |percent: i64| price * Decimal::new(percent, 2);

        Self {
            spec: FurnitureSpec {
                category: listing.category.clone(),
                material: listing.material.clone(),
                dimensions: listing.dimensions,
                finish: listing.finish.clone(),
                color: listing.color.clone(),
                quantity: 1,
            },
            name: Some(listing.name.clone()),
            listing_id: Some(listing.id.clone()),
            price_breakdown: PriceBreakdown {
                base_cost: share(60),
                material_cost: share(20),
                labor_cost: share(15),
                finish_cost: share(5),
                total: price,
            },
            unit_price: price,
        }
    }
}

/// The cart and its derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    pub items: Vec<CartItem>,
    pub total_items: u64,
    pub total_amount: Decimal,
}

impl CartState {
    /// Build a state whose totals are derived from `items`.
    ///
    /// Returns `None` if either total overflows.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Option<Self> {
        let total_items = items
            .iter()
            .try_fold(0_u64, |sum, i| sum.checked_add(u64::from(i.quantity())))?;
        let total_amount = items
            .iter()
            .try_fold(Decimal::ZERO, |sum, i| sum.checked_add(i.total_price))?;
        Some(Self {
            items,
            total_items,
            total_amount,
        })
    }

    /// Find an item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id.as_str() == id)
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Persisted document. Stored totals are ignored on load.
#[derive(Deserialize)]
struct StoredCart {
    #[serde(default)]
    items: Vec<CartItem>,
}

/// Cart operations over a key-value store.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// A cart stored under [`DEFAULT_CART_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_CART_KEY)
    }

    /// A cart stored under a custom key (e.g. one per session).
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The storage key this cart lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted cart.
    ///
    /// Unavailable storage, a missing key and an unreadable document all
    /// yield an empty cart.
    pub fn load(&self) -> CartState {
        if !self.store.is_available() {
            return CartState::default();
        }
        let Some(text) = self.store.get(&self.key) else {
            return CartState::default();
        };

        match serde_json::from_str::<StoredCart>(&text) {
            Ok(stored) => CartState::from_items(stored.items).unwrap_or_else(|| {
                tracing::warn!(key = %self.key, "discarding cart with overflowing totals");
                CartState::default()
            }),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable cart");
                CartState::default()
            }
        }
    }

    /// Append an item with a fresh id and timestamp.
    ///
    /// The new item is the last entry of the returned state. An item whose
    /// price would overflow the cart totals is not added.
    pub fn add(&self, item: NewCartItem) -> CartState {
        let cart = self.load();
        let Some(total_price) = item.unit_price.checked_mul(Decimal::from(item.spec.quantity))
        else {
            tracing::warn!(key = %self.key, "rejecting cart item, line total overflows");
            return cart;
        };

        let mut items = cart.items.clone();
        items.push(CartItem {
            id: CartItemId::generate(),
            spec: item.spec,
            name: item.name,
            listing_id: item.listing_id,
            price_breakdown: item.price_breakdown,
            unit_price: item.unit_price,
            total_price,
            added_at: Utc::now(),
        });

        self.commit(cart, items)
    }

    /// Remove an item. Unknown ids leave the cart unchanged.
    pub fn remove(&self, id: &str) -> CartState {
        let cart = self.load();
        if cart.item(id).is_none() {
            return cart;
        }

        let items = cart
            .items
            .iter()
            .filter(|i| i.id.as_str() != id)
            .cloned()
            .collect();
        self.commit(cart, items)
    }

    /// Change an item's quantity, repricing it from its unit price.
    ///
    /// Non-positive quantities, unknown ids and line totals that would
    /// overflow leave the cart unchanged.
    pub fn update_quantity(&self, id: &str, new_quantity: i64) -> CartState {
        let cart = self.load();
        let Ok(quantity) = u32::try_from(new_quantity) else {
            return cart;
        };
        if quantity == 0 {
            return cart;
        }

        let mut items = cart.items.clone();
        let Some(item) = items.iter_mut().find(|i| i.id.as_str() == id) else {
            return cart;
        };
        let Some(total_price) = item.unit_price.checked_mul(Decimal::from(quantity)) else {
            tracing::warn!(key = %self.key, item_id = id, "rejecting quantity, line total overflows");
            return cart;
        };
        item.spec.quantity = quantity;
        item.total_price = total_price;

        self.commit(cart, items)
    }

    /// Empty the cart.
    pub fn clear(&self) -> CartState {
        self.save(CartState::default())
    }

    /// Save `items` as the new cart, or keep `current` if the totals overflow.
    fn commit(&self, current: CartState, items: Vec<CartItem>) -> CartState {
        match CartState::from_items(items) {
            Some(next) => self.save(next),
            None => {
                tracing::warn!(key = %self.key, "rejecting cart change, total overflows");
                current
            }
        }
    }

    fn save(&self, state: CartState) -> CartState {
        if !self.store.is_available() {
            tracing::debug!(key = %self.key, "cart storage unavailable, keeping cart in memory");
            return state;
        }

        match serde_json::to_string(&state) {
            Ok(text) => {
                if !self.store.set(&self.key, &text) {
                    tracing::warn!(key = %self.key, "failed to persist cart");
                }
            }
            Err(e) => tracing::warn!(key = %self.key, error = %e, "failed to serialize cart"),
        }
        state
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::pricing::{PricingCatalog, compute_price};
    use crate::storage::{DisabledStore, MemoryStore};
    use crate::types::Dimensions;

    fn quoted(category: &str, quantity: u32) -> NewCartItem {
        let spec = FurnitureSpec {
            category: category.to_string(),
            material: "oak".to_string(),
            dimensions: Dimensions::from_inches(24, 36, 24),
            finish: "natural".to_string(),
            color: "natural".to_string(),
            quantity,
        };
        let price = compute_price(&spec, &PricingCatalog::woodora()).unwrap();
        NewCartItem::from_quote(spec, price)
    }

    #[test]
    fn test_add_assigns_id_and_totals() {
        let cart = CartStore::new(MemoryStore::new());
        let state = cart.add(quoted("chair", 2));

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.total_items, 2);
        assert_eq!(state.total_amount, Decimal::new(7_124_416, 2));
        assert_eq!(state.items[0].unit_price, Decimal::new(3_562_208, 2));

        let state = cart.add(quoted("table", 1));
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.total_items, 3);
        assert_ne!(state.items[0].id, state.items[1].id);
        assert_eq!(state.items[1].spec.category, "table");
    }

    #[test]
    fn test_add_then_remove_restores_totals() {
        let cart = CartStore::new(MemoryStore::new());
        let before = cart.add(quoted("sofa", 1));

        let after_add = cart.add(quoted("bed", 3));
        let new_id = after_add.items.last().unwrap().id.clone();
        let after_remove = cart.remove(new_id.as_str());

        assert_eq!(after_remove.total_items, before.total_items);
        assert_eq!(after_remove.total_amount, before.total_amount);
        assert_eq!(after_remove.items, before.items);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let cart = CartStore::new(MemoryStore::new());
        let before = cart.add(quoted("chair", 1));
        assert_eq!(cart.remove("nonexistent-id"), before);
    }

    #[test]
    fn test_update_quantity_reprices_from_unit_price() {
        let cart = CartStore::new(MemoryStore::new());
        let state = cart.add(quoted("chair", 1));
        let id = state.items[0].id.clone();

        let state = cart.update_quantity(id.as_str(), 4);
        assert_eq!(state.items[0].quantity(), 4);
        assert_eq!(state.items[0].total_price, Decimal::new(14_248_832, 2));
        assert_eq!(state.total_items, 4);
        assert_eq!(state.total_amount, state.items[0].total_price);
    }

    #[test]
    fn test_update_to_current_quantity_is_idempotent() {
        let cart = CartStore::new(MemoryStore::new());
        cart.add(quoted("chair", 1));
        let before = cart.add(quoted("dresser", 2));
        let id = before.items[1].id.clone();

        let after = cart.update_quantity(id.as_str(), 2);
        assert_eq!(after.total_items, before.total_items);
        assert_eq!(after.total_amount, before.total_amount);
    }

    #[test]
    fn test_update_rejects_invalid_arguments() {
        let cart = CartStore::new(MemoryStore::new());
        let before = cart.add(quoted("chair", 2));
        let id = before.items[0].id.clone();

        assert_eq!(cart.update_quantity(id.as_str(), 0), before);
        assert_eq!(cart.update_quantity(id.as_str(), -3), before);
        assert_eq!(cart.update_quantity("missing", 5), before);
        assert_eq!(cart.load(), before);
    }

    #[test]
    fn test_clear() {
        let cart = CartStore::new(MemoryStore::new());
        cart.add(quoted("chair", 2));
        let state = cart.clear();
        assert!(state.is_empty());
        assert_eq!(state.total_amount, Decimal::ZERO);
        assert!(cart.load().is_empty());
    }

    #[test]
    fn test_state_persists_across_stores() {
        let store = MemoryStore::new();
        let added = CartStore::new(&store).add(quoted("bookshelf", 1));
        let reloaded = CartStore::new(&store).load();
        assert_eq!(reloaded, added);
    }

    #[test]
    fn test_keys_are_isolated() {
        let store = MemoryStore::new();
        CartStore::with_key(&store, "woodora-cart-a").add(quoted("chair", 1));
        assert!(CartStore::with_key(&store, "woodora-cart-b").load().is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unavailable_storage_still_computes() {
        let cart = CartStore::new(DisabledStore);
        let state = cart.add(quoted("chair", 2));
        assert_eq!(state.total_items, 2);
        assert_eq!(state.total_amount, Decimal::new(7_124_416, 2));

        // Nothing was persisted, so the next operation starts empty.
        assert!(cart.load().is_empty());
        assert!(cart.clear().is_empty());
    }

    #[test]
    fn test_unreadable_document_loads_empty() {
        let store = MemoryStore::new();
        store.set(DEFAULT_CART_KEY, "{not json");
        assert!(CartStore::new(&store).load().is_empty());
    }

    #[test]
    fn test_load_recomputes_stale_totals() {
        let store = MemoryStore::new();
        let cart = CartStore::new(&store);
        let state = cart.add(quoted("chair", 1));

        let mut doc: serde_json::Value =
            serde_json::from_str(&store.get(DEFAULT_CART_KEY).unwrap()).unwrap();
        doc["totalItems"] = serde_json::json!(99);
        doc["totalAmount"] = serde_json::json!("1");
        store.set(DEFAULT_CART_KEY, &doc.to_string());

        assert_eq!(cart.load(), state);
    }

    #[test]
    fn test_persisted_document_layout() {
        let store = MemoryStore::new();
        CartStore::new(&store).add(quoted("chair", 1));
        let doc: serde_json::Value =
            serde_json::from_str(&store.get(DEFAULT_CART_KEY).unwrap()).unwrap();

        let item = &doc["items"][0];
        assert_eq!(item["category"], "chair");
        assert_eq!(item["quantity"], 1);
        assert_eq!(item["unitPrice"], "35622.08");
        assert!(item["priceBreakdown"]["laborCost"].is_string());
        assert!(item["addedAt"].is_string());
        assert_eq!(doc["totalItems"], 1);
    }

    fn listing_priced(price: &str) -> FurnitureListing {
        FurnitureListing {
            id: ListingId::new("FURN-BIG"),
            name: "Heirloom Table".to_string(),
            category: "table".to_string(),
            material: "walnut".to_string(),
            dimensions: Dimensions::from_inches(72, 30, 36),
            finish: "natural".to_string(),
            color: "brown".to_string(),
            price: price.parse().unwrap(),
            stock: 1,
            status: crate::types::ListingStatus::Active,
            images: Vec::new(),
            description: String::new(),
            model3d: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_overflowing_add_is_rejected() {
        let cart = CartStore::new(MemoryStore::new());
        let item = NewCartItem::from_listing(&listing_priced("50000000000000000000000000000"));

        let first = cart.add(item.clone());
        assert_eq!(first.items.len(), 1);

        let second = cart.add(item);
        assert_eq!(second, first);
        assert_eq!(cart.load(), first);
    }

    #[test]
    fn test_overflowing_quantity_is_rejected() {
        let cart = CartStore::new(MemoryStore::new());
        let before = cart.add(NewCartItem::from_listing(&listing_priced(
            "50000000000000000000000000000",
        )));
        let id = before.items[0].id.clone();

        assert_eq!(cart.update_quantity(id.as_str(), 2), before);
        assert_eq!(cart.load().items[0].quantity(), 1);
    }

    #[test]
    fn test_overflowing_line_price_is_rejected() {
        let cart = CartStore::new(MemoryStore::new());
        let mut item = NewCartItem::from_listing(&listing_priced("1"));
        item.unit_price = Decimal::MAX;
        item.spec.quantity = 2;

        assert!(cart.add(item).is_empty());
        assert!(cart.load().is_empty());
    }

    #[test]
    fn test_from_items_reports_overflow() {
        let item = CartItem {
            id: CartItemId::new("a"),
            spec: quoted("chair", 1).spec,
            name: None,
            listing_id: None,
            price_breakdown: PriceBreakdown::default(),
            unit_price: Decimal::MAX,
            total_price: Decimal::MAX,
            added_at: Utc::now(),
        };
        let mut twin = item.clone();
        twin.id = CartItemId::new("b");

        assert!(CartState::from_items(vec![item.clone()]).is_some());
        assert!(CartState::from_items(vec![item, twin]).is_none());
    }

    #[test]
    fn test_from_listing_split() {
        let listing = crate::listing::NewListing {
            name: "Teak Wood Bookshelf".to_string(),
            category: "bookshelf".to_string(),
            material: "teak".to_string(),
            price: serde_json::json!(32000),
            ..crate::listing::NewListing::default()
        }
        .into_listing(Utc::now())
        .unwrap();

        let item = NewCartItem::from_listing(&listing);
        assert_eq!(item.spec.quantity, 1);
        assert_eq!(item.unit_price, Decimal::from(32_000));
        assert_eq!(item.price_breakdown.base_cost, Decimal::from(19_200));
        assert_eq!(item.price_breakdown.unit_price(), Decimal::from(32_000));
        assert_eq!(item.listing_id.as_ref(), Some(&listing.id));
    }
}
