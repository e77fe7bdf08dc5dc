use tracing::{error, info};

use crate::controller::{Controller, ValidationError};
use crate::models::profile::MatchRequest;
use crate::session::{Session, TaskForm};

const BUSY_TEXT: &str = "Finding best matches...";
const FOUND: &str = "Matches found successfully!";
const FAILED: &str = "Failed to find matches. Please try again.";

pub const DEFAULT_TOP_N: u32 = 5;
/// The matcher rejects anything outside this range.
pub const MAX_TOP_N: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Rejected(ValidationError),
    Found(usize),
    Failed,
}

/// Reads the "number of candidates" form field. Unparsable input falls back to
/// the default, and the value is kept within what the matcher accepts.
pub fn parse_top_n(raw: &str) -> u32 {
    raw.trim()
        .parse::<u32>()
        .unwrap_or(DEFAULT_TOP_N)
        .clamp(1, MAX_TOP_N)
}

impl Controller {
    /// Asks the matcher for the best candidates for a task and replaces the results.
    ///
    /// The candidate check is a local gate only; the matcher holds the real set.
    pub async fn find_matches(
        &self,
        session: &mut Session,
        task_description: &str,
        top_n: u32,
    ) -> MatchOutcome {
        let task_description = task_description.trim();
        session.last_task = Some(TaskForm {
            task_description: task_description.to_string(),
            top_n,
        });

        let rejection = if task_description.is_empty() {
            Some(ValidationError::EmptyTaskDescription)
        } else if session.candidates.is_empty() {
            Some(ValidationError::NoCandidates)
        } else {
            None
        };
        if let Some(rejection) = rejection {
            session.notifications.error(rejection.to_string());
            return MatchOutcome::Rejected(rejection);
        }

        self.progress.set_busy(BUSY_TEXT);

        let request = MatchRequest {
            task_description: task_description.to_string(),
            top_n,
        };
        let outcome = match self.matcher.find_matches(&request).await {
            Ok(matches) => {
                info!("Found {} match(es) for top_n={top_n}", matches.len());
                session.stats.record_matches(&matches);
                let found = matches.len();
                session.results = Some(matches);
                session.stats.task_count += 1;
                session.notifications.success(FOUND);
                MatchOutcome::Found(found)
            }
            Err(e) => {
                error!("Matching error: {e}");
                session.notifications.error(FAILED);
                MatchOutcome::Failed
            }
        };

        self.progress.clear_busy();
        outcome
    }
}
