use std::sync::Arc;

use anyhow::Context;
use chat_relay::{config::RelayConfig, init_logging, routes, state::AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = RelayConfig::from_env().context("loading relay configuration")?;
    let state = Arc::new(AppState::new(&config)?);
    let app = routes::create_router(state);

    let address = config.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;

    info!("🚀 chat relay running at http://{}", address);
    info!(upstream = %config.upstream.url, timeout = ?config.upstream.timeout, "forwarding chat messages");
    axum::serve(listener, app).await?;
    Ok(())
}
