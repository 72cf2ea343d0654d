use std::sync::Arc;

use tracing::{debug, info};

use shared_gateway::ApiGateway;
use shared_models::auth::{AuthResponse, LoginRequest, RegisterRequest, User};
use shared_models::error::ApiError;
use shared_query::QueryCache;
use shared_session::SessionStore;

/// Login, registration and logout flows. Credential handling is delegated
/// to the session store; this service only drives the auth endpoints and
/// keeps the cache consistent across identity changes.
pub struct AuthService {
    gateway: Arc<ApiGateway>,
    session: Arc<SessionStore>,
    cache: Arc<QueryCache>,
}

impl AuthService {
    pub fn new(
        gateway: Arc<ApiGateway>,
        session: Arc<SessionStore>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            gateway,
            session,
            cache,
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        debug!("Logging in {}", request.username);
        let response: AuthResponse = self.gateway.post("/api/auth/login", request).await?;

        let user = response.user();
        self.session
            .set_auth(user.clone(), &response.token, &response.refresh_token)
            .await;

        info!("User {} logged in", user.username);
        Ok(user)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        debug!("Registering {}", request.username);
        let response: AuthResponse = self.gateway.post("/api/auth/register", request).await?;

        let user = response.user();
        self.session
            .set_auth(user.clone(), &response.token, &response.refresh_token)
            .await;

        info!("User {} registered", user.username);
        Ok(user)
    }

    /// Drops the session and every cached collection fetched under it.
    pub async fn logout(&self) {
        self.session.logout().await;
        self.cache.clear();
        info!("Session closed");
    }
}
