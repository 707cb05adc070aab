//! Ready-made furniture catalog handlers.
//!
//! Shoppers see only `Active` listings; admin mutations go through the same
//! repository and see everything.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use woodora_core::{Facets, FurnitureListing, ListingFilter, ListingPatch, NewListing, facets};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Active listings matching the query filters, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(filter): Query<ListingFilter>,
) -> Result<Json<Vec<FurnitureListing>>> {
    let active = state.listings().list_active().await?;
    let visible = filter.apply(&active).into_iter().cloned().collect();
    Ok(Json(visible))
}

/// Category and material dropdown values from the active catalog.
#[instrument(skip(state))]
pub async fn facet_values(State(state): State<AppState>) -> Result<Json<Facets>> {
    let active = state.listings().list_active().await?;
    Ok(Json(facets(&active)))
}

/// Create a listing.
#[instrument(skip(state, new), fields(name = %new.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewListing>,
) -> Result<(StatusCode, Json<FurnitureListing>)> {
    let listing = state.listings().create(new).await?;
    add_breadcrumb("catalog", "Created listing", &[("listing_id", listing.id.as_str())]);
    Ok((StatusCode::CREATED, Json(listing)))
}

/// Merge fields into a listing.
#[instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ListingPatch>,
) -> Result<Json<FurnitureListing>> {
    state
        .listings()
        .update(&id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("listing {id}")))
}

/// Delete a listing.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    if state.listings().delete(&id).await? {
        add_breadcrumb("catalog", "Deleted listing", &[("listing_id", id.as_str())]);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("listing {id}")))
    }
}
