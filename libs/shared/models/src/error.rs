use reqwest::StatusCode;
use thiserror::Error;

/// Closed taxonomy for everything that can go wrong between the client and
/// the backend. Callers match on the kind; the gateway never surfaces raw
/// transport errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Session expired: {0}")]
    AuthExpired(String),

    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("Network unavailable: {0}")]
    NetworkUnavailable(#[source] reqwest::Error),

    #[error("Malformed response body: {0}")]
    InvalidResponse(#[source] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{message}")]
    ServerRejected { status: StatusCode, message: String },
}

impl ApiError {
    /// Maps a transport-level failure onto the taxonomy. Timeouts are kept
    /// distinct from unreachable-network failures so the UI can message them
    /// differently; neither is retried by the gateway.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err)
        } else if err.is_decode() {
            ApiError::InvalidResponse(err)
        } else {
            ApiError::NetworkUnavailable(err)
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::ServerRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Extracts the human-readable message from an error body. The backend
    /// sends `{"message": ...}`; some proxies in front of it use `{"error": ...}`.
    pub fn server_message(status: StatusCode, body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .or_else(|| value.get("error"))
                    .and_then(|message| message.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("Request failed with status {}", status))
    }
}
