//! Wire types shared with the matching service.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Structured attributes the matching service extracted from a resume.
///
/// The extractor emits `null` for anything it could not find, so every field is optional
/// and skill lists treat `null` as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub total_years_experience: Option<Experience>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub technical_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Years of experience as the extractor reported them. The matcher stores profiles
/// unvalidated, so fractions (`4.5`) and free text (`"5+"`) show up next to integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Experience {
    Years(u64),
    Fractional(f64),
    Text(String),
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Experience::Years(n) => write!(f, "{n}"),
            Experience::Fractional(n) => write!(f, "{n}"),
            Experience::Text(s) => f.write_str(s.trim()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub employee_id: String,
    pub profile: Profile,
}

/// Body of a successful `POST /upload-resume/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedResume {
    pub employee_id: String,
    pub profile: Profile,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(default)]
    pub employee_id: Option<String>,
    pub profile: Profile,
    pub performance_score: u32, // 0 – 100
    #[serde(default)]
    pub justification: String,
}

/// Body of `POST /find-matches/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub task_description: String,
    pub top_n: u32,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
