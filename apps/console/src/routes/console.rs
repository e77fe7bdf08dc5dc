//! Axum route handlers for the console page and its actions.
//!
//! Actions run their flow, then redirect back to `/` so the page re-renders
//! from the session.

use axum::{
    extract::{Multipart, State},
    response::{Html, Redirect},
    Form, Json,
};
use serde::Deserialize;
use tokio::time::Instant;
use tracing::debug;

use crate::controller::matching::parse_top_n;
use crate::controller::MatchOutcome;
use crate::errors::AppError;
use crate::models::resume_file::ResumeFile;
use crate::render::page::{render_page, PageView};
use crate::session::progress::ProgressSnapshot;
use crate::session::stats::SessionStats;
use crate::state::AppState;

const FILES_FIELD: &str = "files";

#[derive(Debug, Deserialize)]
pub struct MatchForm {
    #[serde(default)]
    pub task_description: String,
    #[serde(default)]
    pub top_n: String,
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Html<String> {
    let mut session = state.session.lock().await;
    let view = PageView::build(
        &mut session,
        state.controller.progress().snapshot(),
        Instant::now(),
    );
    drop(session);
    Html(render_page(&view))
}

/// POST /upload
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut files = Vec::new();
    let mut saw_files_field = false;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        saw_files_field = true;
        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await?;

        // an empty file input still submits one nameless, empty part
        if name.is_empty() && data.is_empty() {
            continue;
        }
        debug!("Received {name} ({content_type}, {} bytes)", data.len());
        files.push(ResumeFile::new(name, content_type, data));
    }

    if !saw_files_field {
        return Err(AppError::BadRequest(format!(
            "expected a multipart field named '{FILES_FIELD}'"
        )));
    }

    let mut session = state.session.lock().await;
    match state.controller.upload_batch(&mut session, files).await {
        Ok(report) => debug!(
            "Upload batch: {} accepted, {} succeeded, {} failed",
            report.accepted, report.succeeded, report.failed
        ),
        // the rejection is already on the page as a notification
        Err(rejection) => debug!("Upload batch rejected: {rejection}"),
    }

    Ok(Redirect::to("/"))
}

/// POST /match
pub async fn handle_match(State(state): State<AppState>, Form(form): Form<MatchForm>) -> Redirect {
    let top_n = parse_top_n(&form.top_n);
    let mut session = state.session.lock().await;
    match state
        .controller
        .find_matches(&mut session, &form.task_description, top_n)
        .await
    {
        MatchOutcome::Found(count) => debug!("Rendering {count} match(es)"),
        MatchOutcome::Rejected(rejection) => debug!("Match request rejected: {rejection}"),
        MatchOutcome::Failed => debug!("Match request failed"),
    }
    Redirect::to("/")
}

/// POST /candidates/refresh
pub async fn handle_refresh_candidates(State(state): State<AppState>) -> Redirect {
    let mut session = state.session.lock().await;
    state.controller.refresh_candidates(&mut session).await;
    Redirect::to("/")
}

/// GET /api/progress
/// Read from the progress channel, so it answers while a batch holds the session.
pub async fn handle_progress(State(state): State<AppState>) -> Json<ProgressSnapshot> {
    Json(state.controller.progress().snapshot())
}

/// GET /api/stats
pub async fn handle_stats(State(state): State<AppState>) -> Json<SessionStats> {
    Json(state.session.lock().await.stats)
}
