mod config;
mod error;
mod logging;
mod render;
mod routes;
mod shutdown;
mod state;

use std::process;
use std::sync::Arc;

use clap::Parser;
use openfoodfacts_lookup::AsyncProductClient;
use tracing::{error, info};

use config::ServerConfig;
use error::StartupError;
use render::Templates;
use state::AppState;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    if let Err(e) = logging::init(&config) {
        eprintln!("{e}");
        process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!("{e}");
        process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let client = AsyncProductClient::builder()
        .api_base(&config.api_base)
        .timeout(config.timeout())
        .variant(config.variant)
        .build()
        .await?;

    let state = Arc::new(AppState {
        client,
        templates: Templates::load()?,
        default_barcodes: config.default_barcodes(),
        concurrency: config.concurrency,
    });

    let app = routes::router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        api_base = %config.api_base,
        variant = ?config.variant,
        "Listening on http://{addr}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::signal())
        .await?;
    Ok(())
}
