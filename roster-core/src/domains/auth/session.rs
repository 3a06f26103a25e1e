use std::sync::Arc;

use roster_model::{AuthToken, LoginRequest};
use tracing::{info, warn};

use crate::error::ApiResult;
use crate::infrastructure::services::AuthService;

use super::storage::TokenStorage;

pub const LOGIN_FAILED: &str = "Login failed";
pub const LOGOUT_FAILED: &str = "Logout failed";

/// Point-in-time view of the session for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<AuthToken>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Owner of the current token. Route access is decided solely by whether it
/// holds one.
#[derive(Debug)]
pub struct SessionStore {
    token: Option<AuthToken>,
    loading: bool,
    error: Option<String>,
    storage: Arc<dyn TokenStorage>,
}

impl SessionStore {
    /// Start from whatever `storage` has persisted. Unreadable storage starts
    /// logged out.
    pub fn restore(storage: Arc<dyn TokenStorage>) -> Self {
        let token = match storage.load() {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "could not restore session; starting logged out");
                None
            }
        };
        Self {
            token,
            loading: false,
            error: None,
            storage,
        }
    }

    pub fn session(&self) -> Session {
        Session {
            token: self.token.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn begin_login(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a login outcome. Returns the normalized failure message on
    /// rejection.
    pub fn finish_login(
        &mut self,
        outcome: ApiResult<AuthToken>,
    ) -> Result<(), String> {
        self.loading = false;
        match outcome {
            Ok(token) => {
                if let Err(err) = self.storage.save(&token) {
                    warn!(error = %err, "session token not persisted");
                }
                self.token = Some(token);
                self.error = None;
                info!("logged in");
                Ok(())
            }
            Err(err) => {
                let message = err.normalized(LOGIN_FAILED);
                warn!(status = ?err.status(), %message, "login rejected");
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }

    pub fn begin_logout(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a logout outcome. The token is dropped and storage cleared no
    /// matter what the server said.
    pub fn finish_logout(&mut self, outcome: ApiResult<()>) -> Result<(), String> {
        self.loading = false;
        self.token = None;
        if let Err(err) = self.storage.clear() {
            warn!(error = %err, "failed to clear persisted session");
        }
        match outcome {
            Ok(()) => {
                info!("logged out");
                Ok(())
            }
            Err(err) => {
                let message = err.normalized(LOGOUT_FAILED);
                warn!(%message, "logout request failed; session cleared locally");
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }

    pub async fn login(
        &mut self,
        service: &dyn AuthService,
        email: &str,
        password: &str,
    ) -> Result<(), String> {
        self.begin_login();
        let credentials = LoginRequest::new(email, password);
        let outcome = service.login(&credentials).await;
        self.finish_login(outcome)
    }

    pub async fn logout(&mut self, service: &dyn AuthService) -> Result<(), String> {
        self.begin_logout();
        let outcome = service.logout().await;
        self.finish_logout(outcome)
    }
}
