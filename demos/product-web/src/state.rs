use openfoodfacts_lookup::AsyncProductClient;

use crate::render::Templates;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Runs blocking lookups on Tokio's blocking pool.
    pub client: AsyncProductClient,

    pub templates: Templates,

    /// Shown by `/product` when the request names no barcodes.
    pub default_barcodes: Vec<String>,

    /// Upstream requests allowed in flight for one batch page.
    pub concurrency: usize,
}
