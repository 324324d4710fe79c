use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Html;
use openfoodfacts_lookup::batch::parse_barcodes;
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ProductsParams {
    pub barcodes: Option<String>,
}

/// GET /
pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.home(&state.default_barcodes)?))
}

/// GET /product?barcodes=3017620422003,3168930000020
///
/// Render every listed product, or the default list when none are given.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProductsParams>,
) -> Result<Html<String>, AppError> {
    let barcodes = parse_barcodes(params.barcodes.as_deref(), &state.default_barcodes);
    debug!(count = barcodes.len(), "rendering product batch");

    let records = state.client.lookup_batch(barcodes, state.concurrency).await;
    Ok(Html(state.templates.products(&records)?))
}

/// GET /product/{barcode}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(barcode): Path<String>,
) -> Result<Html<String>, AppError> {
    let record = state.client.lookup(barcode.trim()).await;
    Ok(Html(state.templates.products(&[record])?))
}
