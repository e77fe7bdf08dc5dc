//! Recording fake of the matching service for controller and route tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::watch;

use crate::controller::Controller;
use crate::matcher_client::{MatcherApi, MatcherError};
use crate::models::profile::{
    Candidate, Experience, MatchRequest, MatchResult, Profile, UploadedResume,
};
use crate::models::resume_file::ResumeFile;
use crate::session::progress::{ProgressSnapshot, ProgressTracker};

pub fn file(name: &str, mime: &str) -> ResumeFile {
    ResumeFile::new(name, mime, Bytes::from_static(b"resume bytes"))
}

pub fn profile(name: &str, technical: &[&str], soft: &[&str]) -> Profile {
    Profile {
        name: Some(name.to_string()),
        total_years_experience: Some(Experience::Years(3)),
        technical_skills: technical.iter().map(|s| s.to_string()).collect(),
        soft_skills: soft.iter().map(|s| s.to_string()).collect(),
        summary: Some(format!("{name} builds things.")),
    }
}

pub fn scored(name: &str, score: u32) -> MatchResult {
    MatchResult {
        employee_id: Some(format!("id-{name}")),
        profile: profile(name, &["Go"], &[]),
        performance_score: score,
        justification: format!("{name} fits."),
    }
}

pub enum MatchReply {
    Matches(Vec<MatchResult>),
    Fail,
}

/// Upload behaviour is keyed on the file name:
/// `bad*` fails with a server detail, `unreadable*` fails without one,
/// anything else succeeds and becomes a candidate named after the file stem.
pub struct FakeMatcher {
    progress: Option<watch::Receiver<ProgressSnapshot>>,
    uploads: Mutex<Vec<(String, ProgressSnapshot)>>,
    match_requests: Mutex<Vec<MatchRequest>>,
    candidates: Mutex<Vec<Candidate>>,
    match_reply: Mutex<MatchReply>,
    candidate_calls: AtomicUsize,
    fail_candidates: AtomicBool,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeMatcher {
    pub fn new(progress: Option<watch::Receiver<ProgressSnapshot>>) -> Self {
        Self {
            progress,
            uploads: Mutex::new(Vec::new()),
            match_requests: Mutex::new(Vec::new()),
            candidates: Mutex::new(Vec::new()),
            match_reply: Mutex::new(MatchReply::Matches(Vec::new())),
            candidate_calls: AtomicUsize::new(0),
            fail_candidates: AtomicBool::new(false),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_controller() -> (Arc<Self>, Controller) {
        let tracker = ProgressTracker::new();
        let fake = Arc::new(Self::new(Some(tracker.subscribe())));
        let controller = Controller::new(fake.clone(), tracker);
        (fake, controller)
    }

    pub fn set_candidates(&self, candidates: Vec<Candidate>) {
        *self.candidates.lock().unwrap() = candidates;
    }

    /// Makes `list_candidates` answer with a server error from now on.
    pub fn fail_candidate_listing(&self) {
        self.fail_candidates.store(true, Ordering::SeqCst);
    }

    pub fn reply_with(&self, reply: MatchReply) {
        *self.match_reply.lock().unwrap() = reply;
    }

    pub fn uploaded_names(&self) -> Vec<String> {
        self.uploads.lock().unwrap().iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn progress_at_upload(&self) -> Vec<u8> {
        self.uploads.lock().unwrap().iter().map(|(_, p)| p.percent).collect()
    }

    pub fn labels_at_upload(&self) -> Vec<String> {
        self.uploads.lock().unwrap().iter().map(|(_, p)| p.label.clone()).collect()
    }

    pub fn busy_during_uploads(&self) -> bool {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .all(|(_, p)| p.busy.as_deref() == Some("Uploading resumes..."))
    }

    pub fn match_requests(&self) -> Vec<MatchRequest> {
        self.match_requests.lock().unwrap().clone()
    }

    pub fn candidate_calls(&self) -> usize {
        self.candidate_calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.uploads.lock().unwrap().len()
            + self.match_requests.lock().unwrap().len()
            + self.candidate_calls()
    }
}

#[async_trait]
impl MatcherApi for FakeMatcher {
    async fn upload_resume(&self, file: &ResumeFile) -> Result<UploadedResume, MatcherError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let snapshot = self
            .progress
            .as_ref()
            .map(|rx| rx.borrow().clone())
            .unwrap_or_default();
        self.uploads.lock().unwrap().push((file.name.clone(), snapshot));

        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if file.name.starts_with("bad") {
            return Err(MatcherError::Api {
                status: 400,
                detail: Some("Unsupported file type".to_string()),
            });
        }
        if file.name.starts_with("unreadable") {
            return Err(MatcherError::Api {
                status: 500,
                detail: None,
            });
        }

        let stem = file.name.rsplit_once('.').map_or(file.name.as_str(), |(s, _)| s);
        let mut candidates = self.candidates.lock().unwrap();
        let uploaded = UploadedResume {
            employee_id: format!("e{}", candidates.len() + 1),
            profile: profile(stem, &["Go"], &[]),
            message: None,
        };
        candidates.push(Candidate {
            employee_id: uploaded.employee_id.clone(),
            profile: uploaded.profile.clone(),
        });
        Ok(uploaded)
    }

    async fn find_matches(&self, request: &MatchRequest) -> Result<Vec<MatchResult>, MatcherError> {
        self.match_requests.lock().unwrap().push(request.clone());
        match &*self.match_reply.lock().unwrap() {
            MatchReply::Matches(matches) => Ok(matches.clone()),
            MatchReply::Fail => Err(MatcherError::Api {
                status: 500,
                detail: Some("Failed to score candidates using AI.".to_string()),
            }),
        }
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, MatcherError> {
        self.candidate_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_candidates.load(Ordering::SeqCst) {
            return Err(MatcherError::Api {
                status: 503,
                detail: None,
            });
        }
        Ok(self.candidates.lock().unwrap().clone())
    }
}
