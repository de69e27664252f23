mod airport;
mod auth;
mod community;
mod config;
mod congestion;
mod errors;
mod forecast_client;
mod parking;
mod routes;
mod state;
mod travel_kit;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::HttpIdentityVerifier;
use crate::community::store::{InMemoryPostStore, PostStore, RtdbPostStore};
use crate::config::{Config, StoreBackend};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Travelkit API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize post store (in-memory by default, swap via STORE_BACKEND)
    let store = build_store(&config);

    // Initialize identity verifier
    let identity = Arc::new(HttpIdentityVerifier::new(config.auth_base_url.clone()));
    info!("Identity verifier initialized ({})", config.auth_base_url);

    // Build app state
    let state = AppState::new(config.clone(), store, identity);
    info!("Post feed subscribed ({} posts)", state.feed.snapshot().len());

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_store(config: &Config) -> Arc<dyn PostStore> {
    match &config.store_backend {
        StoreBackend::Memory => {
            info!("Post store: in-memory");
            Arc::new(InMemoryPostStore::new())
        }
        StoreBackend::Rtdb { url, auth } => {
            info!("Post store: realtime database at {url}");
            Arc::new(RtdbPostStore::new(
                url.clone(),
                auth.clone(),
                Duration::from_secs(config.store_poll_interval_secs),
            ))
        }
    }
}
