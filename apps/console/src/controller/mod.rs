//! Controller flows: upload batches, matching requests and candidate refresh.
//!
//! Flows take the session explicitly and only touch it from the one running
//! operation. Validation failures surface as error notifications and never reach
//! the network; matcher failures are handled per flow.

pub mod candidates;
pub mod matching;
pub mod upload;

use std::sync::Arc;

use thiserror::Error;

use crate::matcher_client::MatcherApi;
use crate::session::progress::ProgressTracker;

pub use matching::MatchOutcome;

/// Input problems caught before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select PDF or DOCX files only.")]
    NoAcceptedFiles,

    #[error("Please enter a task description.")]
    EmptyTaskDescription,

    #[error("Please upload some resumes first.")]
    NoCandidates,
}

#[derive(Clone)]
pub struct Controller {
    matcher: Arc<dyn MatcherApi>,
    progress: ProgressTracker,
}

impl Controller {
    pub fn new(matcher: Arc<dyn MatcherApi>, progress: ProgressTracker) -> Self {
        Self { matcher, progress }
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }
}
