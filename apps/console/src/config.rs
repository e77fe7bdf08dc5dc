use anyhow::{Context, Result};

/// Address of the matching service when `MATCHER_API_URL` is not set.
pub const DEFAULT_MATCHER_API_URL: &str = "http://localhost:8000";

/// Console configuration loaded from environment variables.
/// Every variable has a default, so the console starts against a local matcher out of the box.
#[derive(Debug, Clone)]
pub struct Config {
    pub matcher_api_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Seed two sample candidates when the matcher has none.
    pub demo_candidates: bool,
    pub max_upload_mb: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            matcher_api_url: normalize_base_url(
                &std::env::var("MATCHER_API_URL")
                    .unwrap_or_else(|_| DEFAULT_MATCHER_API_URL.to_string()),
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            demo_candidates: parse_flag("DEMO_CANDIDATES")?,
            max_upload_mb: std::env::var("MAX_UPLOAD_MB")
                .unwrap_or_else(|_| "20".to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_MB must be a whole number of megabytes")?,
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            matcher_api_url: DEFAULT_MATCHER_API_URL.to_string(),
            port: 3000,
            rust_log: "info".to_string(),
            demo_candidates: false,
            max_upload_mb: 20,
        }
    }
}

fn parse_flag(key: &str) -> Result<bool> {
    match std::env::var(key) {
        Err(_) => Ok(false),
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "" | "0" | "false" | "no" | "off" => Ok(false),
            other => anyhow::bail!("{key} must be a boolean, got '{other}'"),
        },
    }
}

/// Endpoint paths are joined with a leading slash, so the base keeps none at the end.
fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
