//! product-api server binary

use product_api::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if config.uses_default_api_key() {
        tracing::warn!("API_KEY is not set, falling back to the built-in development key");
    }

    tracing::info!(
        seed = config.seed,
        create = ?config.auth.create,
        update = ?config.auth.update,
        delete = ?config.auth.delete,
        "starting product-api"
    );

    ServerBuilder::new().with_config(config).serve().await
}
