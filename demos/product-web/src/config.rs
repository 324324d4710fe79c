//! Server configuration, from CLI flags with environment fallbacks.

use std::time::Duration;

use clap::Parser;
use openfoodfacts_lookup::config::{self as lookup_config, API_BASE};
use openfoodfacts_lookup::Variant;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "openfoodfacts-web", about = "OpenFoodFacts product pages", long_about = None)]
pub struct ServerConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "PRODUCT_WEB_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "PRODUCT_WEB_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Root of the OpenFoodFacts API, without the `/product/...` suffix
    #[arg(long, env = "PRODUCT_WEB_API_BASE", default_value = API_BASE)]
    pub api_base: String,

    /// Record shape to render (basic, extended)
    #[arg(long, env = "PRODUCT_WEB_VARIANT", default_value = "extended")]
    pub variant: Variant,

    /// Upstream request timeout in seconds
    #[arg(long, env = "PRODUCT_WEB_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Maximum upstream requests in flight per batch page (1 = sequential)
    #[arg(long, env = "PRODUCT_WEB_CONCURRENCY", default_value_t = 1)]
    pub concurrency: usize,

    /// Barcodes shown by `/product` when none are requested (comma-separated)
    #[arg(long, env = "PRODUCT_WEB_DEFAULT_BARCODES", value_delimiter = ',')]
    pub default_barcodes: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PRODUCT_WEB_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "PRODUCT_WEB_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured fallback list, or the built-in one when none was given.
    pub fn default_barcodes(&self) -> Vec<String> {
        let configured: Vec<String> = self
            .default_barcodes
            .iter()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();
        if configured.is_empty() {
            lookup_config::default_barcodes()
        } else {
            configured
        }
    }
}
