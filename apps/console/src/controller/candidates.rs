use tracing::{info, warn};

use crate::controller::Controller;
use crate::models::profile::{Candidate, Experience, Profile};
use crate::session::Session;

impl Controller {
    /// Replaces the local candidate cache with the matcher's list.
    /// A failed refresh is logged and leaves the cache as it was.
    pub async fn refresh_candidates(&self, session: &mut Session) -> bool {
        match self.matcher.list_candidates().await {
            Ok(candidates) => {
                info!("Loaded {} candidate(s)", candidates.len());
                session.candidates = candidates;
                true
            }
            Err(e) => {
                warn!("Failed to load candidates: {e}");
                false
            }
        }
    }
}

/// Seeds two sample candidates when the cache is empty, for trying the console
/// without a populated matcher. Returns whether anything was seeded.
pub fn seed_demo_candidates(session: &mut Session) -> bool {
    if !session.candidates.is_empty() {
        return false;
    }

    session.candidates = vec![
        Candidate {
            employee_id: "sample-1".to_string(),
            profile: Profile {
                name: Some("John Smith".to_string()),
                total_years_experience: Some(Experience::Years(5)),
                technical_skills: strings(&["Python", "JavaScript", "React", "Node.js", "MongoDB"]),
                soft_skills: strings(&["Leadership", "Communication", "Problem Solving"]),
                summary: Some(
                    "Senior full-stack developer with expertise in modern web technologies and team leadership."
                        .to_string(),
                ),
            },
        },
        Candidate {
            employee_id: "sample-2".to_string(),
            profile: Profile {
                name: Some("Sarah Johnson".to_string()),
                total_years_experience: Some(Experience::Years(3)),
                technical_skills: strings(&["Java", "Spring Boot", "MySQL", "Docker"]),
                soft_skills: strings(&["Collaboration", "Time Management"]),
                summary: Some(
                    "Backend developer specializing in Java enterprise applications and microservices architecture."
                        .to_string(),
                ),
            },
        },
    ];
    session.stats.upload_count = 2;
    info!("Seeded {} demo candidate(s)", session.candidates.len());
    true
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
