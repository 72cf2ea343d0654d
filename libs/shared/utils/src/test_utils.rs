use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_session::{MemoryStorage, SessionStore};

pub struct TestConfig {
    pub api_url: String,
    pub timeout_ms: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            timeout_ms: 5_000,
        }
    }
}

impl TestConfig {
    /// Points the config at a mock server.
    pub fn for_server(uri: &str) -> Self {
        Self {
            api_url: uri.to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_url: self.api_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_millis(self.timeout_ms),
            session_storage_path: PathBuf::from(".test-session.json"),
        }
    }
}

pub fn sample_user() -> User {
    User {
        id: 1,
        username: "mgarcia".to_string(),
        email: "mgarcia@consultorio.test".to_string(),
        roles: vec!["ADMIN".to_string()],
    }
}

/// In-memory session with no credentials.
pub fn anonymous_session() -> Arc<SessionStore> {
    Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())))
}

/// In-memory session already holding the given token pair.
pub async fn authenticated_session(access_token: &str, refresh_token: &str) -> Arc<SessionStore> {
    let session = anonymous_session();
    session
        .set_auth(sample_user(), access_token, refresh_token)
        .await;
    session
}
