//! The console's single in-memory session.
//!
//! Owned by `AppState` behind one async mutex and passed explicitly to the
//! controller flows. Lives for the process lifetime; nothing is persisted.

pub mod notifications;
pub mod progress;
pub mod stats;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::profile::{Candidate, MatchResult, UploadedResume};
use notifications::NotificationCenter;
use stats::SessionStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Success,
    Error,
}

/// One line in the upload list, for a single upload attempt.
#[derive(Debug, Clone, Serialize)]
pub struct FileRow {
    pub file_name: String,
    pub status: FileStatus,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Last submitted matching form, echoed back into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub task_description: String,
    pub top_n: u32,
}

#[derive(Debug, Default)]
pub struct Session {
    pub uploaded: Vec<UploadedResume>,
    pub candidates: Vec<Candidate>,
    pub stats: SessionStats,
    pub file_rows: Vec<FileRow>,
    /// `None` until the first successful match; the results section stays hidden until then.
    pub results: Option<Vec<MatchResult>>,
    pub notifications: NotificationCenter,
    pub last_task: Option<TaskForm>,
}

impl Session {
    pub fn add_file_row(&mut self, file_name: &str, status: FileStatus, message: impl Into<String>) {
        self.file_rows.push(FileRow {
            file_name: file_name.to_string(),
            status,
            message: message.into(),
            at: Utc::now(),
        });
    }
}
