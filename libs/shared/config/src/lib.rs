use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Fallback backend host used when neither API_URL nor a dev proxy is set.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SESSION_STORAGE_PATH: &str = ".consultorio/session.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub request_timeout: Duration,
    pub session_storage_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_url = match env::var("API_URL") {
            Ok(url) => url,
            Err(_) => {
                if env::var("API_DEV_PROXY").is_ok() {
                    // Relative base: a local dev proxy sits in front of the backend.
                    String::new()
                } else {
                    warn!("API_URL not set, using {}", DEFAULT_API_URL);
                    DEFAULT_API_URL.to_string()
                }
            }
        };

        let request_timeout = env::var("API_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let session_storage_path = env::var("SESSION_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_STORAGE_PATH));

        Self {
            api_url: normalize_base_url(&api_url),
            request_timeout,
            session_storage_path,
        }
    }

    pub fn uses_proxy(&self) -> bool {
        self.api_url.is_empty()
    }
}

/// Requests are built as `base + path`, so the base must not end in a slash.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
