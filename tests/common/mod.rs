//! Shared fixtures for the lookup integration tests.
//!
//! Provides sample upstream payloads and `FakeApi`, a loopback axum server
//! that answers product requests with canned responses so the blocking client
//! can be exercised end to end without the network.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// A `product` object shaped like the upstream's answer for a hazelnut spread.
pub fn spread_product() -> Value {
    json!({
        "product_name": "Nutella",
        "image_front_url": "https://images.openfoodfacts.org/images/products/301/762/042/2003/front_en.jpg",
        "nutriments": {
            "energy-kcal_100g": 539,
            "fat_100g": 30.9,
            "saturated-fat_100g": 10.6,
            "carbohydrates_100g": 57.5,
            "sugars_100g": 56.3,
            "proteins_100g": 6.3,
            "salt_100g": 0.107,
            "sodium_100g": 0.0428,
            "carbohydrates": 57.5,
            "proteins": 6.3,
            "fat": 30.9,
            "sugars": 56.3,
            "salt": 0.107,
            "energy-kcal_serving": 80.8,
            "fat_serving": 4.64,
            "sugars_serving": 8.45,
            "proteins_serving": 0.945
        },
        "nutrient_levels": {
            "fat": "high",
            "salt": "low",
            "saturated-fat": "high",
            "sugars": "high"
        },
        "ingredients": [
            { "id": "en:sugar", "text": "sugar" },
            { "id": "en:palm-oil", "text": "PALM OIL" },
            { "id": "en:hazelnut", "text": "hazelnuts 13%" },
            { "id": "en:skimmed-milk-powder", "text": "skimmed milk powder" }
        ],
        "allergens": "en:milk, en:nuts",
        "nutriscore_grade": "e",
        "ecoscore_grade": "d",
        "nova_group": 4
    })
}

/// Wrap a product the way the v2 endpoint does for a hit.
pub fn found_body(product: Value) -> String {
    json!({ "code": "3017620422003", "status": 1, "status_verbose": "product found", "product": product })
        .to_string()
}

/// A `status: 0` body, as sent for an unknown barcode.
pub fn missing_body() -> String {
    json!({ "code": "0000000000000", "status": 0, "status_verbose": "product not found" }).to_string()
}

// ---------------------------------------------------------------------------
// FakeApi
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    delay: Duration,
}

#[derive(Clone, Default)]
struct Shared {
    routes: Arc<Mutex<HashMap<String, Canned>>>,
    seen: Arc<Mutex<Vec<(String, String)>>>,
}

impl Shared {
    fn record(&self, uri: &Uri, headers: &HeaderMap) {
        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.seen
            .lock()
            .unwrap()
            .push((uri.path().to_string(), user_agent));
    }
}

/// Loopback axum server answering `GET /api/v2/product/{barcode}`.
///
/// Barcodes without a canned response, and any other path, get a 404 with an
/// empty body. Every raw request path and `User-Agent` is recorded for
/// assertions.
pub struct FakeApi {
    pub api_base: String,
    shared: Shared,
}

impl FakeApi {
    pub fn start() -> Self {
        let shared = Shared::default();
        let app = Router::new()
            .route("/api/v2/product/{barcode}", get(product))
            .fallback(unknown)
            .with_state(shared.clone());

        // Served from a dedicated runtime thread; callers may be blocking or async.
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });
        let addr = rx.recv().unwrap();

        Self {
            api_base: format!("http://{addr}/api/v2"),
            shared,
        }
    }

    pub fn respond(&self, barcode: &str, status: u16, body: impl Into<String>) -> &Self {
        self.respond_after(barcode, status, body, Duration::ZERO)
    }

    pub fn respond_after(
        &self,
        barcode: &str,
        status: u16,
        body: impl Into<String>,
        delay: Duration,
    ) -> &Self {
        self.shared.routes.lock().unwrap().insert(
            barcode.to_string(),
            Canned {
                status: StatusCode::from_u16(status).unwrap(),
                body: body.into(),
                delay,
            },
        );
        self
    }

    /// Raw request paths received so far, in arrival order.
    pub fn paths(&self) -> Vec<String> {
        self.shared.seen.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn user_agents(&self) -> Vec<String> {
        self.shared.seen.lock().unwrap().iter().map(|(_, ua)| ua.clone()).collect()
    }
}

async fn product(
    State(shared): State<Shared>,
    Path(barcode): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    shared.record(&uri, &headers);

    let canned = shared.routes.lock().unwrap().get(&barcode).cloned();
    let Some(canned) = canned else {
        return StatusCode::NOT_FOUND.into_response();
    };
    tokio::time::sleep(canned.delay).await;
    (
        canned.status,
        [(header::CONTENT_TYPE, "application/json")],
        canned.body,
    )
        .into_response()
}

async fn unknown(State(shared): State<Shared>, uri: Uri, headers: HeaderMap) -> StatusCode {
    shared.record(&uri, &headers);
    StatusCode::NOT_FOUND
}

/// An API base on a loopback port nothing listens on.
pub fn unreachable_api_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/v2")
}
