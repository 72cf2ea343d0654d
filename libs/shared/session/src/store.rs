use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tracing::{debug, warn};

use shared_models::auth::User;

use crate::storage::{SessionStorage, REFRESH_TOKEN_KEY, TOKEN_KEY, USER_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Anonymous,
    Authenticated,
    /// Credentials became unusable (refresh failure); the UI should route
    /// back to the login entry point.
    Expired,
}

#[derive(Debug, Clone)]
struct SessionState {
    user: Option<User>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    generation: u64,
    phase: SessionPhase,
}

impl SessionState {
    fn anonymous() -> Self {
        Self {
            user: None,
            access_token: None,
            refresh_token: None,
            generation: 0,
            phase: SessionPhase::Anonymous,
        }
    }
}

/// Sole owner of the token pair and the logged-in user. Tokens are mutated
/// only by login, refresh success and logout/expiry; every outgoing request
/// reads them through a cheap snapshot. The generation counter advances on
/// every token mutation, which is what lets the gateway coalesce concurrent
/// 401 recoveries.
pub struct SessionStore {
    state: RwLock<SessionState>,
    storage: Arc<dyn SessionStorage>,
    phase_tx: watch::Sender<SessionPhase>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let (phase_tx, _) = watch::channel(SessionPhase::Anonymous);
        Self {
            state: RwLock::new(SessionState::anonymous()),
            storage,
            phase_tx,
        }
    }

    /// Rebuilds the session from persisted storage so a restart does not log
    /// the user out. Unreadable entries degrade to an anonymous session.
    pub async fn restore(storage: Arc<dyn SessionStorage>) -> Self {
        let store = Self::new(storage);

        let token = store.read_key(TOKEN_KEY).await;
        let refresh_token = store.read_key(REFRESH_TOKEN_KEY).await;
        let user = store.read_key(USER_KEY).await.and_then(|raw| {
            serde_json::from_str::<User>(&raw)
                .map_err(|err| warn!("Ignoring unreadable persisted user: {}", err))
                .ok()
        });

        if let Some(token) = token {
            debug!("Restored persisted session");
            {
                let mut state = store.state.write().unwrap();
                state.access_token = Some(token);
                state.refresh_token = refresh_token;
                state.user = user;
                state.phase = SessionPhase::Authenticated;
            }
            store.phase_tx.send_replace(SessionPhase::Authenticated);
        }

        store
    }

    async fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key).await {
            Ok(value) => value,
            Err(err) => {
                warn!("Failed to read {} from session storage: {:#}", key, err);
                None
            }
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.read().unwrap().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.state.read().unwrap().refresh_token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().unwrap().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().unwrap().phase == SessionPhase::Authenticated
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.read().unwrap().phase
    }

    pub fn generation(&self) -> u64 {
        self.state.read().unwrap().generation
    }

    /// Access token together with the generation it belongs to, read in one
    /// step so a request can later tell whether the session changed under it.
    pub fn token_snapshot(&self) -> (Option<String>, u64) {
        let state = self.state.read().unwrap();
        (state.access_token.clone(), state.generation)
    }

    /// Phase changes (notably `Expired`) are broadcast here; the shell layer
    /// watches this to navigate back to login.
    pub fn watch_phase(&self) -> watch::Receiver<SessionPhase> {
        self.phase_tx.subscribe()
    }

    /// Installs a fresh session after a successful login or registration.
    pub async fn set_auth(&self, user: User, access_token: &str, refresh_token: &str) {
        {
            let mut state = self.state.write().unwrap();
            state.user = Some(user.clone());
            state.access_token = Some(access_token.to_string());
            state.refresh_token = Some(refresh_token.to_string());
            state.generation += 1;
            state.phase = SessionPhase::Authenticated;
        }

        self.persist(TOKEN_KEY, access_token).await;
        self.persist(REFRESH_TOKEN_KEY, refresh_token).await;
        match serde_json::to_string(&user) {
            Ok(raw) => self.persist(USER_KEY, &raw).await,
            Err(err) => warn!("Failed to serialize user for persistence: {}", err),
        }

        self.phase_tx.send_replace(SessionPhase::Authenticated);
        debug!("Session established for {}", user.username);
    }

    /// Applies a refresh result. The refresh token is only replaced when the
    /// backend rotated it.
    pub async fn apply_refresh(&self, access_token: &str, refresh_token: Option<&str>) {
        {
            let mut state = self.state.write().unwrap();
            state.access_token = Some(access_token.to_string());
            if let Some(rotated) = refresh_token {
                state.refresh_token = Some(rotated.to_string());
            }
            state.generation += 1;
        }

        self.persist(TOKEN_KEY, access_token).await;
        if let Some(rotated) = refresh_token {
            self.persist(REFRESH_TOKEN_KEY, rotated).await;
        }
    }

    /// Explicit logout: drops credentials and returns to the anonymous phase.
    pub async fn logout(&self) {
        self.reset(SessionPhase::Anonymous).await;
    }

    /// Irrecoverable credential failure: drops credentials and broadcasts
    /// `Expired` so the shell can route to login.
    pub async fn expire(&self) {
        self.reset(SessionPhase::Expired).await;
    }

    async fn reset(&self, phase: SessionPhase) {
        let had_credentials = {
            let mut state = self.state.write().unwrap();
            let had = state.access_token.is_some()
                || state.refresh_token.is_some()
                || state.user.is_some();
            state.user = None;
            state.access_token = None;
            state.refresh_token = None;
            state.generation += 1;
            state.phase = phase;
            had
        };

        // Storage is cleared in one step, and only when there was a session
        // to clear, so concurrent expiries collapse into a single wipe.
        if had_credentials {
            if let Err(err) = self.storage.clear().await {
                warn!("Failed to clear session storage: {:#}", err);
            }
        }

        self.phase_tx.send_replace(phase);
    }

    async fn persist(&self, key: &str, value: &str) {
        if let Err(err) = self.storage.set(key, value).await {
            warn!("Failed to persist {} to session storage: {:#}", key, err);
        }
    }
}
