//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Health check
//!
//! # Pricing
//! GET    /api/catalog            - Price list (categories, materials, finishes, colors)
//! POST   /api/quote              - Price a customization
//!
//! # Ready-made catalog
//! GET    /api/furniture          - Active listings (?search=&category=&material=)
//! GET    /api/furniture/facets   - Filter dropdown values
//! POST   /api/furniture          - Create listing
//! PATCH  /api/furniture/{id}     - Update listing
//! DELETE /api/furniture/{id}     - Delete listing
//!
//! # Cart
//! GET    /cart                   - Current cart
//! POST   /cart/add               - Add a custom piece
//! POST   /cart/add-listing       - Add a ready-made listing
//! POST   /cart/update            - Change quantity
//! POST   /cart/remove            - Remove item
//! POST   /cart/clear             - Empty the cart
//! GET    /cart/count             - Cart count badge
//! ```

pub mod cart;
pub mod furniture;
pub mod quote;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the pricing and catalog API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(quote::catalog))
        .route("/quote", post(quote::quote))
        .route(
            "/furniture",
            get(furniture::index).post(furniture::create),
        )
        .route("/furniture/facets", get(furniture::facet_values))
        .route(
            "/furniture/{id}",
            patch(furniture::update).delete(furniture::delete),
        )
}

/// Create the cart router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/add-listing", post(cart::add_listing))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .nest("/cart", cart_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
