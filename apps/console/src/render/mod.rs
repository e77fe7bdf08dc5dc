//! Typed view models and their HTML.
//!
//! Everything that came from the matcher or the user goes through `escape`
//! before it is placed in markup.

pub mod cards;
pub mod page;

use crate::models::profile::{Candidate, Experience, MatchResult, Profile};

pub const RESULT_TECHNICAL_LIMIT: usize = 5;
pub const CANDIDATE_TECHNICAL_LIMIT: usize = 4;
pub const SOFT_LIMIT: usize = 3;

const UNNAMED: &str = "Unnamed candidate";

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// The first `limit` skills plus how many were left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillList {
    pub shown: Vec<String>,
    pub more: usize,
}

impl SkillList {
    pub fn truncated(skills: &[String], limit: usize) -> Self {
        Self {
            shown: skills.iter().take(limit).cloned().collect(),
            more: skills.len().saturating_sub(limit),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultCardView {
    pub rank: usize,
    pub name: String,
    pub score: u32,
    pub experience: String,
    pub technical: SkillList,
    pub soft: SkillList,
    pub justification: String,
}

impl ResultCardView {
    /// `rank` is 1-based.
    pub fn new(m: &MatchResult, rank: usize) -> Self {
        Self {
            rank,
            name: display_name(&m.profile),
            score: m.performance_score,
            experience: experience(&m.profile),
            technical: SkillList::truncated(&m.profile.technical_skills, RESULT_TECHNICAL_LIMIT),
            soft: SkillList::truncated(&m.profile.soft_skills, SOFT_LIMIT),
            justification: m.justification.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateCardView {
    pub name: String,
    pub summary: String,
    pub experience: String,
    pub technical: SkillList,
    pub soft: SkillList,
}

impl CandidateCardView {
    pub fn new(c: &Candidate) -> Self {
        Self {
            name: display_name(&c.profile),
            summary: c.profile.summary.clone().unwrap_or_default(),
            experience: experience(&c.profile),
            technical: SkillList::truncated(&c.profile.technical_skills, CANDIDATE_TECHNICAL_LIMIT),
            soft: SkillList::truncated(&c.profile.soft_skills, SOFT_LIMIT),
        }
    }
}

fn display_name(profile: &Profile) -> String {
    profile
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNNAMED)
        .to_string()
}

fn experience(profile: &Profile) -> String {
    match &profile.total_years_experience {
        Some(Experience::Text(text)) if text.trim().is_empty() => "Not stated".to_string(),
        Some(years) => format!("{years} years"),
        None => "Not stated".to_string(),
    }
}
