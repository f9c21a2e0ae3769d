mod auth;
mod config;
mod pages;
mod routes;
mod state;

use std::net::SocketAddr;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shindig_core::Store;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // Make sure an event record exists before the first request
    let store = Store::open(&config.data_dir)?;
    if store.seed_default_event()? {
        info!("created default event in {}", config.data_dir.display());
    }

    let port = config.port;
    let app = routes::app(AppState::new(config)).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("shindig-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
