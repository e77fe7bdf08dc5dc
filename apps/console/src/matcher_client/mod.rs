/// Matcher client — the single point of entry for all calls to the resume-matching service.
///
/// No other module talks to the matcher directly; controllers depend on the
/// `MatcherApi` trait so flows can run against a recording fake in tests.
///
/// Calls are made once. There is no retry and no timeout beyond the transport default.
use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::profile::{Candidate, MatchRequest, MatchResult, UploadedResume};
use crate::models::resume_file::ResumeFile;

const UPLOAD_PATH: &str = "/upload-resume/";
const MATCH_PATH: &str = "/find-matches/";
const CANDIDATES_PATH: &str = "/candidates/";

#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Matcher API error (status {status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl MatcherError {
    /// Text shown to the user for a failed call: the server's `detail` when it sent one,
    /// `fallback` for any other non-2xx, the transport error otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            MatcherError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            MatcherError::Api { detail: None, .. } => fallback.to_string(),
            MatcherError::Http(e) => e.to_string(),
            MatcherError::Parse(e) => e.to_string(),
        }
    }
}

/// Error body returned by the matcher on non-2xx responses.
/// `detail` is a string for handled errors and a list for request validation errors.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Operations the console needs from the matching service.
#[async_trait]
pub trait MatcherApi: Send + Sync {
    async fn upload_resume(&self, file: &ResumeFile) -> Result<UploadedResume, MatcherError>;

    async fn find_matches(&self, request: &MatchRequest) -> Result<Vec<MatchResult>, MatcherError>;

    /// All candidates the service holds, in the order it returned them.
    async fn list_candidates(&self) -> Result<Vec<Candidate>, MatcherError>;
}

/// HTTP implementation of `MatcherApi` over the matcher's REST endpoints.
#[derive(Clone)]
pub struct MatcherClient {
    client: Client,
    base_url: String,
}

impl MatcherClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MatcherError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl MatcherApi for MatcherClient {
    async fn upload_resume(&self, file: &ResumeFile) -> Result<UploadedResume, MatcherError> {
        let mime: &str = match file.kind() {
            Some(kind) => kind.mime(),
            None => &file.content_type,
        };
        let part = multipart::Part::bytes(file.data.to_vec())
            .file_name(file.name.clone())
            .mime_str(mime)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;

        let uploaded: UploadedResume = parse_success(response).await?;
        debug!(
            "Uploaded {} as employee {}",
            file.name, uploaded.employee_id
        );
        Ok(uploaded)
    }

    async fn find_matches(&self, request: &MatchRequest) -> Result<Vec<MatchResult>, MatcherError> {
        let response = self
            .client
            .post(self.url(MATCH_PATH))
            .json(request)
            .send()
            .await?;

        let matches: Vec<MatchResult> = parse_success(response).await?;
        debug!("Matcher returned {} match(es)", matches.len());
        Ok(matches)
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, MatcherError> {
        let response = self.client.get(self.url(CANDIDATES_PATH)).send().await?;
        let by_id: serde_json::Map<String, serde_json::Value> = parse_success(response).await?;
        Ok(candidates_from_map(by_id))
    }
}

/// Decodes a 2xx body as `T`, or turns anything else into `MatcherError::Api`.
async fn parse_success<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, MatcherError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!("Matcher API returned {}: {}", status, body);
        return Err(MatcherError::Api {
            status: status.as_u16(),
            detail: error_detail(&body),
        });
    }

    serde_json::from_str(&body).map_err(MatcherError::Parse)
}

fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.detail)
        .and_then(|d| match d {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        })
}

/// The candidates endpoint is keyed by employee id; only the values are kept.
/// Entries that do not decode are skipped rather than failing the whole refresh.
fn candidates_from_map(by_id: serde_json::Map<String, serde_json::Value>) -> Vec<Candidate> {
    by_id
        .into_iter()
        .filter_map(|(id, value)| match serde_json::from_value::<Candidate>(value) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                warn!("Skipping candidate {id}: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Multipart,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use bytes::Bytes;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    use crate::models::resume_file::PDF_MIME;

    #[derive(Default)]
    struct Seen {
        upload_fields: Vec<(String, Option<String>, Option<String>)>,
        match_bodies: Vec<Value>,
    }

    /// Stand-in for the matching service on an ephemeral local port.
    async fn spawn_matcher(seen: Arc<Mutex<Seen>>) -> String {
        let upload_seen = seen.clone();
        let match_seen = seen.clone();

        let app = Router::new()
            .route(
                "/upload-resume/",
                post(move |mut multipart: Multipart| {
                    let seen = upload_seen.clone();
                    async move {
                        let mut file_name = None;
                        while let Some(field) = multipart.next_field().await.unwrap() {
                            let name = field.name().unwrap_or_default().to_string();
                            let fname = field.file_name().map(str::to_string);
                            let ctype = field.content_type().map(str::to_string);
                            seen.lock().unwrap().upload_fields.push((name, fname.clone(), ctype));
                            file_name = fname;
                        }
                        if file_name.as_deref() == Some("broken.pdf") {
                            return (
                                StatusCode::BAD_REQUEST,
                                Json(json!({ "detail": "The uploaded document appears to be empty or could not be read." })),
                            );
                        }
                        (
                            StatusCode::CREATED,
                            Json(json!({
                                "message": "Resume processed and candidate profile created.",
                                "employee_id": "e1",
                                "profile": { "name": "Ann", "total_years_experience": 2,
                                             "technical_skills": ["Go"], "soft_skills": [],
                                             "summary": "Backend engineer." }
                            })),
                        )
                    }
                }),
            )
            .route(
                "/find-matches/",
                post(move |Json(body): Json<Value>| {
                    let seen = match_seen.clone();
                    async move {
                        let top_n = body["top_n"].as_u64().unwrap_or(0);
                        seen.lock().unwrap().match_bodies.push(body);
                        if top_n == 0 {
                            return (
                                StatusCode::UNPROCESSABLE_ENTITY,
                                Json(json!({ "detail": [{ "loc": ["body", "top_n"], "msg": "too small" }] })),
                            );
                        }
                        (
                            StatusCode::OK,
                            Json(json!([
                                { "employee_id": "e1", "profile": { "name": "Ann" },
                                  "performance_score": 80, "justification": "Strong Go." },
                                { "employee_id": "e2", "profile": { "name": "Bob" },
                                  "performance_score": 60, "justification": "Some Go." }
                            ])),
                        )
                    }
                }),
            )
            .route(
                "/candidates/",
                get(|| async {
                    Json(json!({
                        "z-last-key": { "employee_id": "z-last-key", "profile": { "name": "Zed" } },
                        "a-first-key": { "employee_id": "a-first-key", "profile": { "name": "Amy" } },
                        "broken": { "profile": "not an object" }
                    }))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn pdf(name: &str) -> ResumeFile {
        ResumeFile::new(name, PDF_MIME, Bytes::from_static(b"%PDF-1.7"))
    }

    #[tokio::test]
    async fn test_upload_sends_single_file_field() {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let client = MatcherClient::new(spawn_matcher(seen.clone()).await).unwrap();

        let uploaded = client.upload_resume(&pdf("ann.pdf")).await.unwrap();

        assert_eq!(uploaded.employee_id, "e1");
        assert_eq!(uploaded.profile.name.as_deref(), Some("Ann"));
        let fields = &seen.lock().unwrap().upload_fields;
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "file");
        assert_eq!(fields[0].1.as_deref(), Some("ann.pdf"));
        assert_eq!(fields[0].2.as_deref(), Some(PDF_MIME));
    }

    #[tokio::test]
    async fn test_upload_failure_carries_server_detail() {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let client = MatcherClient::new(spawn_matcher(seen).await).unwrap();

        let err = client.upload_resume(&pdf("broken.pdf")).await.unwrap_err();

        assert!(matches!(err, MatcherError::Api { status: 400, .. }));
        assert_eq!(
            err.user_message("Upload failed"),
            "The uploaded document appears to be empty or could not be read."
        );
    }

    #[tokio::test]
    async fn test_find_matches_posts_json_body() {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let client = MatcherClient::new(spawn_matcher(seen.clone()).await).unwrap();

        let matches = client
            .find_matches(&MatchRequest {
                task_description: "Senior Go developer for a data pipeline".to_string(),
                top_n: 2,
            })
            .await
            .unwrap();

        let scores: Vec<u32> = matches.iter().map(|m| m.performance_score).collect();
        assert_eq!(scores, vec![80, 60]);
        assert_eq!(
            seen.lock().unwrap().match_bodies[0],
            json!({ "task_description": "Senior Go developer for a data pipeline", "top_n": 2 })
        );
    }

    #[tokio::test]
    async fn test_validation_detail_list_falls_back_to_generic_message() {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let client = MatcherClient::new(spawn_matcher(seen).await).unwrap();

        let err = client
            .find_matches(&MatchRequest {
                task_description: "x".to_string(),
                top_n: 0,
            })
            .await
            .unwrap_err();

        assert_eq!(err.user_message("Matching failed"), "Matching failed");
    }

    #[tokio::test]
    async fn test_candidates_keep_server_order_and_skip_bad_entries() {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let client = MatcherClient::new(spawn_matcher(seen).await).unwrap();

        let candidates = client.list_candidates().await.unwrap();

        let ids: Vec<_> = candidates.iter().map(|c| c.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["z-last-key", "a-first-key"]);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_http_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = MatcherClient::new(format!("http://{addr}")).unwrap();
        let err = client.list_candidates().await.unwrap_err();

        assert!(matches!(err, MatcherError::Http(_)));
        assert!(!err.user_message("Upload failed").is_empty());
    }

    #[test]
    fn test_error_detail_ignores_non_json() {
        assert_eq!(error_detail("<html>502</html>"), None);
        assert_eq!(error_detail(r#"{"detail":""}"#), None);
        assert_eq!(error_detail(r#"{"detail":"nope"}"#).as_deref(), Some("nope"));
    }
}
