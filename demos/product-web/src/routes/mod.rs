pub mod api;
pub mod pages;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/product", get(pages::list_products))
        .route("/product/{barcode}", get(pages::get_product))
        .route("/api/product/{barcode}", get(api::get_product))
        .route("/healthz", get(api::healthz))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use openfoodfacts_lookup::{AsyncProductClient, Variant};
    use tower::ServiceExt;

    use super::*;
    use crate::render::Templates;

    /// State whose client points at a port nothing listens on, so every
    /// lookup fails fast.
    async fn offline_state(defaults: &[&str]) -> Arc<AppState> {
        let client = AsyncProductClient::builder()
            .api_base("http://127.0.0.1:1/api/v2")
            .variant(Variant::Basic)
            .build()
            .await
            .unwrap();
        Arc::new(AppState {
            client,
            templates: Templates::load().unwrap(),
            default_barcodes: defaults.iter().map(|s| s.to_string()).collect(),
            concurrency: 1,
        })
    }

    async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, String) {
        let response = router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn healthz_is_ok() {
        let (status, body) = get(offline_state(&[]).await, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn home_renders() {
        let (status, body) = get(offline_state(&["42"]).await, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<form action=\"/product\""));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn batch_page_uses_requested_barcodes_in_order() {
        let (status, body) = get(offline_state(&["999"]).await, "/product?barcodes=123,%20456").await;
        assert_eq!(status, StatusCode::OK);

        let first = body.find(">123<").unwrap();
        let second = body.find(">456<").unwrap();
        assert!(first < second);
        assert!(!body.contains(">999<"));
        assert_eq!(body.matches("Error fetching data").count(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn batch_page_falls_back_to_defaults() {
        let (status, body) = get(offline_state(&["111", "222"]).await, "/product").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.find(">111<").unwrap() < body.find(">222<").unwrap());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn single_product_page_renders_one_record() {
        let (status, body) = get(offline_state(&["111"]).await, "/product/3017620422003").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(">3017620422003<"));
        assert_eq!(body.matches("class=\"product error\"").count(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn api_returns_record_json() {
        let (status, body) = get(offline_state(&[]).await, "/api/product/555").await;
        assert_eq!(status, StatusCode::OK);

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["barcode"], "555");
        assert_eq!(value["name"], "Error fetching data");
        assert_eq!(value["error"], true);
        assert_eq!(value["nutrients"]["Salt"], "Not available");
    }
}
