//! OpenFoodFacts product lookup for Rust.
//!
//! Fetches products from the OpenFoodFacts API by barcode and normalizes
//! them into [`ProductRecord`]s ready to hand to a template. A lookup never
//! fails: unknown barcodes and broken requests come back as records with a
//! placeholder name and `error = true`.
//!
//! # Quick start
//!
//! ```no_run
//! use openfoodfacts_lookup::ProductClient;
//!
//! let client = ProductClient::builder().build().unwrap();
//!
//! let record = client.lookup("3017620422003");
//! println!("{}: {:?}", record.name, record.nutrients.get("Protein"));
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod batch;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod normalize;

#[cfg(feature = "async")]
pub use async_client::AsyncProductClient;
pub use config::Variant;
pub use error::{LookupError, Result};
pub use fetch::FetchOutcome;
pub use models::{ExtendedDetails, Grade, NovaGroup, NutrientTable, NutrientValue, ProductRecord};

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// ProductClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`ProductClient`].
///
/// Use [`ProductClient::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](ProductClientBuilder::build).
#[derive(Debug, Clone)]
pub struct ProductClientBuilder {
    api_base: String,
    timeout: Duration,
    user_agent: String,
    variant: Variant,
}

impl Default for ProductClientBuilder {
    fn default() -> Self {
        Self {
            api_base: config::API_BASE.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            user_agent: config::USER_AGENT.to_string(),
            variant: Variant::default(),
        }
    }
}

impl ProductClientBuilder {
    /// Point the client at a different API root (the part before
    /// `/product/{barcode}`).
    ///
    /// Defaults to [`config::API_BASE`].
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the per-request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header sent upstream.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Choose which record shape lookups produce. Defaults to
    /// [`Variant::Extended`].
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Build the client.
    ///
    /// Fails only if the API base is not a usable URL or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<ProductClient> {
        fetch::product_url(&self.api_base, "0")?;
        let http = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()?;
        Ok(ProductClient {
            http,
            api_base: self.api_base,
            variant: self.variant,
        })
    }
}

// ---------------------------------------------------------------------------
// ProductClient
// ---------------------------------------------------------------------------

/// Blocking OpenFoodFacts client.
///
/// Holds no per-lookup state; every call to [`lookup`](Self::lookup) is an
/// independent request.
pub struct ProductClient {
    http: Client,
    api_base: String,
    variant: Variant,
}

impl ProductClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> ProductClientBuilder {
        ProductClientBuilder::default()
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetch a product without normalizing it.
    ///
    /// Transport problems, non-success statuses and undecodable bodies are
    /// returned as errors.
    pub fn fetch(&self, barcode: &str) -> Result<FetchOutcome> {
        fetch::fetch_product(&self.http, &self.api_base, barcode)
    }

    /// Look up one barcode and normalize the result.
    ///
    /// Always returns a well-formed record. Failures are logged and turned
    /// into a record with `error = true`.
    pub fn lookup(&self, barcode: &str) -> ProductRecord {
        match self.fetch(barcode) {
            Ok(FetchOutcome::Found(product)) => normalize::found(barcode, &product, self.variant),
            Ok(FetchOutcome::Missing) => {
                debug!(barcode, "product not found upstream");
                ProductRecord::not_found(barcode, self.variant)
            }
            Err(e) => {
                warn!(barcode, error = %e, "API request failed");
                ProductRecord::fetch_failed(barcode, self.variant)
            }
        }
    }

    /// Look up each barcode in order, one at a time.
    ///
    /// A failing barcode yields an error record and does not stop the rest.
    pub fn lookup_batch(&self, barcodes: &[String]) -> Vec<ProductRecord> {
        barcodes.iter().map(|b| self.lookup(b)).collect()
    }
}

impl fmt::Debug for ProductClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductClient")
            .field("api_base", &self.api_base)
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ProductClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProductClient(api_base={}, variant={:?})",
            self.api_base, self.variant
        )
    }
}
