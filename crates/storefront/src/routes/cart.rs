//! Cart route handlers.
//!
//! Each session gets its own cart key. Items are priced on the server: a
//! custom piece is re-quoted and a listing is looked up by id, so clients
//! never supply prices.
//!
//! Cart storage does blocking file I/O, so every cart operation runs on the
//! blocking thread pool.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;
use woodora_core::{CartState, CartStore, FurnitureSpec, KeyValueStore, NewCartItem};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::cart_key;
use crate::routes::quote::Quote;
use crate::state::AppState;

/// Add-a-listing request.
#[derive(Debug, Deserialize)]
pub struct AddListingRequest {
    pub listing_id: String,
}

/// Quantity change request.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub item_id: String,
    pub quantity: i64,
}

/// Remove request.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub item_id: String,
}

/// Cart badge count.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Run `op` against the cart stored under `key` off the async workers.
async fn with_cart<T, F>(state: &AppState, key: &str, op: F) -> Result<T>
where
    F: FnOnce(&CartStore<Arc<dyn KeyValueStore>>) -> T + Send + 'static,
    T: Send + 'static,
{
    let cart = state.cart(key);
    tokio::task::spawn_blocking(move || op(&cart))
        .await
        .map_err(|e| AppError::Internal(format!("cart task failed: {e}")))
}

/// Current cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartState>> {
    let key = cart_key(&session).await?;
    Ok(Json(with_cart(&state, &key, CartStore::load).await?))
}

/// Price a customization and add it to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(spec): Json<FurnitureSpec>,
) -> Result<Json<CartState>> {
    let quote = Quote::price(&spec, state.pricing())?;
    let key = cart_key(&session).await?;

    let item = NewCartItem::from_quote(spec, quote.breakdown);
    let cart = with_cart(&state, &key, move |cart| cart.add(item)).await?;
    add_breadcrumb("cart", "Added custom piece", &[("cart_key", key.as_str())]);
    Ok(Json(cart))
}

/// Add a ready-made listing to the cart.
#[instrument(skip(state, session))]
pub async fn add_listing(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddListingRequest>,
) -> Result<Json<CartState>> {
    let listing = state
        .listings()
        .find_by_id(&request.listing_id)
        .await?
        .filter(|l| l.status.is_active())
        .ok_or_else(|| AppError::NotFound(format!("listing {}", request.listing_id)))?;
    let key = cart_key(&session).await?;

    let item = NewCartItem::from_listing(&listing);
    let cart = with_cart(&state, &key, move |cart| cart.add(item)).await?;
    add_breadcrumb(
        "cart",
        "Added listing",
        &[("cart_key", key.as_str()), ("listing_id", listing.id.as_str())],
    );
    Ok(Json(cart))
}

/// Change an item's quantity. Unknown ids and quantities below one leave
/// the cart unchanged.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartState>> {
    let key = cart_key(&session).await?;
    let cart = with_cart(&state, &key, move |cart| {
        cart.update_quantity(&request.item_id, request.quantity)
    })
    .await?;
    Ok(Json(cart))
}

/// Remove an item.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartState>> {
    let key = cart_key(&session).await?;
    let cart = with_cart(&state, &key, move |cart| cart.remove(&request.item_id)).await?;
    Ok(Json(cart))
}

/// Empty the cart.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<CartState>> {
    let key = cart_key(&session).await?;
    Ok(Json(with_cart(&state, &key, CartStore::clear).await?))
}

/// Number of pieces in the cart.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<Json<CartCount>> {
    let key = cart_key(&session).await?;
    let count = with_cart(&state, &key, |cart| cart.load().total_items).await?;
    Ok(Json(CartCount { count }))
}
