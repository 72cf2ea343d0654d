use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_models::auth::{RefreshRequest, RefreshResponse};
use shared_models::error::ApiError;
use shared_session::SessionStore;

const REFRESH_PATH: &str = "/api/auth/refresh";

/// Where the 401-recovery machine stands. `Refreshing` is only ever visible
/// from inside the critical section; observers see `Normal` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Normal,
    Refreshing,
    Failed,
}

struct RefreshGate {
    state: RefreshState,
}

enum RefreshOutcome {
    Token(String),
    Expired,
}

/// Authenticated HTTP front door. Attaches the bearer token from the
/// session store to every request and recovers transparently from access
/// token expiry: the first 401 triggers a single-flight refresh and one
/// replay; everything else propagates unchanged.
pub struct ApiGateway {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
    refresh_gate: Mutex<RefreshGate>,
}

impl ApiGateway {
    pub fn new(config: &AppConfig, session: Arc<SessionStore>) -> Self {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("HTTP client options are static");

        Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
            refresh_gate: Mutex::new(RefreshGate {
                state: RefreshState::Normal,
            }),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None, None).await
    }

    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, ApiError> {
        self.request(Method::GET, path, None, Some(params)).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, Some(serde_json::to_value(body)?), None)
            .await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, path, Some(serde_json::to_value(body)?), None)
            .await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::PATCH, path, Some(serde_json::to_value(body)?), None)
            .await
    }

    pub async fn patch_no_body<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::PATCH, path, None, None).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, None, None).await?;
        Ok(())
    }

    /// Sends an authenticated request and decodes the JSON response body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        params: Option<&[(String, String)]>,
    ) -> Result<T, ApiError> {
        let response = self.execute(method, path, body.as_ref(), params).await?;
        response.json::<T>().await.map_err(ApiError::from_transport)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        params: Option<&[(String, String)]>,
    ) -> Result<Response, ApiError> {
        let (token, generation) = self.session.token_snapshot();
        let response = self
            .send_once(method.clone(), path, body, params, token.as_deref())
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check_status(response).await;
        }

        // First 401 on this request: run the single-flight refresh and
        // replay exactly once with its outcome.
        let message = Self::rejection_message(response).await;
        debug!("Received 401 for {} {}, recovering", method, path);

        match self.refresh_access_token(generation).await {
            RefreshOutcome::Token(token) => {
                let replay = self
                    .send_once(method, path, body, params, Some(&token))
                    .await?;
                // A 401 on a replayed request is never retried again.
                Self::check_status(replay).await
            }
            RefreshOutcome::Expired => Err(ApiError::AuthExpired(message)),
        }
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        params: Option<&[(String, String)]>,
        token: Option<&str>,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url).headers(self.headers(token));
        if let Some(params) = params {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(ApiError::from_transport)
    }

    fn headers(&self, token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Stored access token is not a valid header value, sending unauthenticated"),
            }
        }

        headers
    }

    /// Single-flight 401 recovery. The first caller through the gate runs
    /// the refresh; callers queued behind it observe the bumped session
    /// generation and reuse the outcome instead of refreshing again.
    async fn refresh_access_token(&self, seen_generation: u64) -> RefreshOutcome {
        let mut gate = self.refresh_gate.lock().await;

        if self.session.generation() != seen_generation {
            // The session moved on while we waited: a refresh, login or
            // logout already resolved this round of 401s.
            return match self.session.access_token() {
                Some(token) => RefreshOutcome::Token(token),
                None => RefreshOutcome::Expired,
            };
        }

        gate.state = RefreshState::Refreshing;

        let Some(refresh_token) = self.session.refresh_token() else {
            warn!("401 with no stored refresh token, expiring session");
            gate.state = RefreshState::Failed;
            self.session.expire().await;
            return RefreshOutcome::Expired;
        };

        match self.post_refresh(&refresh_token).await {
            Ok(refreshed) => {
                self.session
                    .apply_refresh(&refreshed.token, refreshed.refresh_token.as_deref())
                    .await;
                gate.state = RefreshState::Normal;
                debug!("Access token refreshed");
                RefreshOutcome::Token(refreshed.token)
            }
            Err(err) => {
                warn!("Token refresh failed, expiring session: {}", err);
                gate.state = RefreshState::Failed;
                self.session.expire().await;
                RefreshOutcome::Expired
            }
        }
    }

    /// Direct call to the refresh endpoint, outside the recovery machinery
    /// and without a bearer token.
    async fn post_refresh(&self, refresh_token: &str) -> Result<RefreshResponse, ApiError> {
        let url = format!("{}{}", self.base_url, REFRESH_PATH);
        let request = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .headers(self.headers(None))
            .json(&request)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let response = Self::check_status(response).await?;
        response
            .json::<RefreshResponse>()
            .await
            .map_err(ApiError::from_transport)
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = Self::rejection_message(response).await;
        Err(ApiError::ServerRejected { status, message })
    }

    async fn rejection_message(response: Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ApiError::server_message(status, &body)
    }

    /// Last observed state of the 401-recovery machine.
    pub async fn refresh_state(&self) -> RefreshState {
        self.refresh_gate.lock().await.state
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
