mod analysis;
mod auth;
mod backend_client;
mod config;
mod errors;
mod models;
mod pages;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend_client::HttpBackend;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Smart Resume Ranker web v{}", env!("CARGO_PKG_VERSION"));

    // Backend client; outbound calls are bounded by the configured timeout
    let backend = HttpBackend::new(&config.backend_url, config.request_timeout)
        .context("Failed to build backend HTTP client")?;
    info!(
        "Ranking backend: {} (timeout {}s)",
        config.backend_url,
        config.request_timeout.as_secs()
    );

    let state = AppState {
        backend: Arc::new(backend),
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
