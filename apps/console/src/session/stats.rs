use serde::Serialize;

use crate::models::profile::MatchResult;

/// Counters shown in the stats bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub upload_count: u32,
    pub task_count: u32,
    pub avg_score: u32,
}

impl SessionStats {
    pub fn record_matches(&mut self, matches: &[MatchResult]) {
        self.avg_score = average_score(matches);
    }
}

/// `round(sum / count)` with halves rounded up; 0 for an empty set.
pub fn average_score(matches: &[MatchResult]) -> u32 {
    if matches.is_empty() {
        return 0;
    }
    let count = matches.len() as u64;
    let sum: u64 = matches.iter().map(|m| u64::from(m.performance_score)).sum();
    ((2 * sum + count) / (2 * count)) as u32
}
