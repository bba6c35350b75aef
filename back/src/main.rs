use std::sync::Arc;

use clap::Parser;
use todo_back::{Config, Store, ENDPOINTS};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log)?)
        .init();

    let store = Arc::new(Store::new());
    if !config.no_seed {
        store.seed().await;
    }

    let addr = config.addr();
    tracing::info!(%addr, todos = store.len().await, "server starting");
    for (method, path, purpose) in ENDPOINTS {
        tracing::info!("   {method:<9} {path:<10} - {purpose}");
    }

    let app = todo_back::app(store);

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
