use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::controller::Controller;
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Held for the whole of a flow, so only one operation mutates the session at a time.
    pub session: Arc<Mutex<Session>>,
    pub controller: Controller,
    pub config: Config,
}

impl AppState {
    pub fn new(controller: Controller, session: Session, config: Config) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            controller,
            config,
        }
    }
}
