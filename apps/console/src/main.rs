mod config;
mod controller;
mod errors;
mod matcher_client;
mod models;
mod render;
mod routes;
mod session;
mod state;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::controller::candidates::seed_demo_candidates;
use crate::controller::Controller;
use crate::matcher_client::MatcherClient;
use crate::routes::build_router;
use crate::session::progress::ProgressTracker;
use crate::session::Session;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Match Console v{}", env!("CARGO_PKG_VERSION"));

    let matcher = MatcherClient::new(config.matcher_api_url.clone())?;
    info!("Matcher client initialized (base URL: {})", matcher.base_url());

    let controller = Controller::new(Arc::new(matcher), ProgressTracker::new());

    // Initial candidate load; an unreachable matcher only leaves the list empty
    let mut session = Session::default();
    controller.refresh_candidates(&mut session).await;
    if config.demo_candidates {
        seed_demo_candidates(&mut session);
    }

    let state = AppState::new(controller, session, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
