pub mod console;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(console::handle_index))
        .route("/upload", post(console::handle_upload))
        .route("/match", post(console::handle_match))
        .route("/candidates/refresh", post(console::handle_refresh_candidates))
        .route("/api/progress", get(console::handle_progress))
        .route("/api/stats", get(console::handle_stats))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
