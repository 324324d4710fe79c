//! Async wrapper around [`ProductClient`] for use in Tokio runtimes.
//!
//! Lookups run on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client waits on the upstream.
//!
//! # Example
//!
//! ```no_run
//! use openfoodfacts_lookup::AsyncProductClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = AsyncProductClient::builder().build().await.unwrap();
//!
//!     let barcodes = vec!["3017620422003".to_string(), "3168930000020".to_string()];
//!     let records = client.lookup_batch(barcodes, 4).await;
//!     assert_eq!(records.len(), 2);
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::warn;

use crate::config::Variant;
use crate::error::{LookupError, Result};
use crate::models::ProductRecord;
use crate::{ProductClient, ProductClientBuilder};

// ---------------------------------------------------------------------------
// AsyncProductClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncProductClient`].
#[derive(Debug, Clone, Default)]
pub struct AsyncProductClientBuilder {
    inner: ProductClientBuilder,
}

impl AsyncProductClientBuilder {
    /// See [`ProductClientBuilder::api_base`].
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.inner = self.inner.api_base(api_base);
        self
    }

    /// See [`ProductClientBuilder::timeout`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// See [`ProductClientBuilder::user_agent`].
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.inner = self.inner.user_agent(user_agent);
        self
    }

    /// See [`ProductClientBuilder::variant`].
    pub fn variant(mut self, variant: Variant) -> Self {
        self.inner = self.inner.variant(variant);
        self
    }

    /// Build the async client.
    ///
    /// The blocking HTTP client is constructed on the blocking thread pool,
    /// since it may not be created from inside the async event loop.
    pub async fn build(self) -> Result<AsyncProductClient> {
        let client = tokio::task::spawn_blocking(move || self.inner.build())
            .await
            .map_err(|e| LookupError::InvalidArgument(format!("Task join error: {e}")))??;
        Ok(AsyncProductClient {
            inner: Arc::new(client),
        })
    }
}

// ---------------------------------------------------------------------------
// AsyncProductClient
// ---------------------------------------------------------------------------

/// Async wrapper around [`ProductClient`].
///
/// Cheap to clone; clones share the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct AsyncProductClient {
    inner: Arc<ProductClient>,
}

impl AsyncProductClient {
    /// Create a new builder for configuring the async client.
    pub fn builder() -> AsyncProductClientBuilder {
        AsyncProductClientBuilder::default()
    }

    pub fn variant(&self) -> Variant {
        self.inner.variant()
    }

    /// Run a sync client operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ProductClient) -> T + Send + 'static,
        T: Send + 'static,
    {
        let client = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&client))
            .await
            .map_err(|e| LookupError::InvalidArgument(format!("Task join error: {e}")))
    }

    /// Look up one barcode. Never fails; see [`ProductClient::lookup`].
    pub async fn lookup(&self, barcode: &str) -> ProductRecord {
        let owned = barcode.to_string();
        match self.run(move |c| c.lookup(&owned)).await {
            Ok(record) => record,
            Err(e) => {
                warn!(barcode, error = %e, "lookup task failed");
                ProductRecord::fetch_failed(barcode, self.variant())
            }
        }
    }

    /// Look up many barcodes with at most `concurrency` requests in flight.
    ///
    /// Records come back in the order of `barcodes`. A `concurrency` of 0 or 1
    /// looks barcodes up one after another, in list order.
    pub async fn lookup_batch(&self, barcodes: Vec<String>, concurrency: usize) -> Vec<ProductRecord> {
        if concurrency <= 1 {
            let mut records = Vec::with_capacity(barcodes.len());
            for barcode in &barcodes {
                records.push(self.lookup(barcode).await);
            }
            return records;
        }

        let limit = Arc::new(Semaphore::new(concurrency));
        let mut tasks = JoinSet::new();

        for (idx, barcode) in barcodes.iter().cloned().enumerate() {
            let client = self.clone();
            let limit = limit.clone();
            tasks.spawn(async move {
                let _permit = limit.acquire_owned().await.ok();
                (idx, client.lookup(&barcode).await)
            });
        }

        let mut slots: Vec<Option<ProductRecord>> = vec![None; barcodes.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, record)) => {
                    if let Some(slot) = slots.get_mut(idx) {
                        *slot = Some(record);
                    }
                }
                Err(e) => warn!(error = %e, "batch lookup task failed"),
            }
        }

        slots
            .into_iter()
            .zip(barcodes)
            .map(|(slot, barcode)| {
                slot.unwrap_or_else(|| ProductRecord::fetch_failed(&barcode, self.variant()))
            })
            .collect()
    }

    /// Release the client, dropping the blocking HTTP client off the event
    /// loop.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self.inner))
            .await
            .map_err(|e| LookupError::InvalidArgument(format!("Task join error: {e}")))
    }
}
