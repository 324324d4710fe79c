//! Transport layer: one blocking GET against the product endpoint.
//!
//! Unlike [`ProductClient::lookup`](crate::ProductClient::lookup), everything
//! here reports failure through [`LookupError`] so callers that want the
//! distinction between "missing" and "broken" can have it.

use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::error::{LookupError, Result};

/// What the upstream said about a barcode.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The `product` object from a `status: 1` response.
    Found(Value),
    /// The upstream answered, but has no such product.
    Missing,
}

/// Build `{api_base}/product/{barcode}` with the barcode as a single,
/// percent-encoded path segment.
pub fn product_url(api_base: &str, barcode: &str) -> Result<Url> {
    if barcode.trim().is_empty() {
        return Err(LookupError::InvalidArgument("barcode is empty".into()));
    }
    let mut url = Url::parse(api_base)
        .map_err(|e| LookupError::InvalidArgument(format!("invalid API base '{api_base}': {e}")))?;
    url.path_segments_mut()
        .map_err(|()| LookupError::InvalidArgument(format!("API base '{api_base}' cannot take a path")))?
        .pop_if_empty()
        .push("product")
        .push(barcode);
    Ok(url)
}

/// Fetch and classify one product.
pub fn fetch_product(client: &Client, api_base: &str, barcode: &str) -> Result<FetchOutcome> {
    let url = product_url(api_base, barcode)?;
    debug!(%url, "requesting product");

    let resp = client.get(url).send()?;
    let status = resp.status();

    // Any non-2xx, 404 included, is a transport failure.
    if !status.is_success() {
        return Err(LookupError::Status(status.as_u16()));
    }

    let body: Value = serde_json::from_str(&resp.text()?)?;
    Ok(classify(body))
}

/// Interpret a decoded response body.
pub fn classify(mut body: Value) -> FetchOutcome {
    if status_flag(&body) != Some(1) {
        return FetchOutcome::Missing;
    }
    match body.get_mut("product").map(Value::take) {
        Some(product @ Value::Object(_)) => FetchOutcome::Found(product),
        _ => FetchOutcome::Found(Value::Object(Default::default())),
    }
}

fn status_flag(body: &Value) -> Option<i64> {
    match body.get("status")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
