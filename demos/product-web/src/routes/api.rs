use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use openfoodfacts_lookup::ProductRecord;

use crate::state::AppState;

/// GET /api/product/{barcode}
///
/// The normalized record as JSON. Lookup failures are still a 200 with
/// `"error": true`, matching what the HTML page shows.
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(barcode): Path<String>,
) -> Json<ProductRecord> {
    Json(state.client.lookup(barcode.trim()).await)
}

/// GET /healthz
pub async fn healthz() -> &'static str {
    "ok"
}
