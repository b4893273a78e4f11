//! Session Manager
//!
//! Single owner of the "who is logged in" state. Two states exist:
//! unauthenticated (`None`) and authenticated (`Some(user)`). The published
//! user and the persisted token never disagree; an undecodable token is
//! handled as a logout. With expiry checking on, so is a held token whose
//! `exp` passes while the process runs.

use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

use crate::api::{AuthApi, AuthResponse, LoginRequest, RegisterRequest};
use crate::error::{AuthError, DecodeError};
use crate::store::TokenStore;
use crate::token::{decode_claims, exp_passed, TokenClaims};
use crate::user::User;
use crate::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Treat tokens whose `exp` claim has passed as undecodable.
    pub check_expiry: bool,
}

/// Token backing the published user.
struct ActiveToken {
    value: String,
    exp: Option<i64>,
}

pub struct SessionManager {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn TokenStore>,
    /// In-memory mirror of the persisted token, set only alongside a user
    token: Arc<RwLock<Option<ActiveToken>>>,
    state: Arc<watch::Sender<Option<User>>>,
    /// Held for the duration of a login request
    login_gate: Arc<Mutex<()>>,
    options: SessionOptions,
}

impl SessionManager {
    /// Build the manager and restore any session persisted by a previous run.
    ///
    /// No network call is made: a stored token that still decodes becomes
    /// the initial state, anything else leaves the session unauthenticated.
    pub fn new(
        api: Arc<dyn AuthApi>,
        store: Arc<dyn TokenStore>,
        options: SessionOptions,
    ) -> Self {
        let (state, _) = watch::channel(None);

        let manager = Self {
            api,
            store,
            token: Arc::new(RwLock::new(None)),
            state: Arc::new(state),
            login_gate: Arc::new(Mutex::new(())),
            options,
        };
        manager.restore();
        manager
    }

    fn restore(&self) {
        match self.store.load() {
            Ok(Some(token)) => {
                if let Some(user) = self.set_user_from_token(&token) {
                    tracing::info!(username = %user.username, "Restored persisted session");
                }
            }
            Ok(None) => tracing::debug!("No persisted session"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read persisted token");
                self.logout();
            }
        }
    }

    /// Exchange credentials for a token and enter the authenticated state.
    ///
    /// API failures are returned unchanged and leave the session as it was.
    /// A token that cannot be decoded still yields `Ok`, but the session
    /// ends up unauthenticated.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let _pending = self
            .login_gate
            .try_lock()
            .map_err(|_| AuthError::LoginInProgress)?;

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = match self.api.login(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(username = %username, error = %e, "Login failed");
                return Err(e);
            }
        };

        let token = response.token.trim();
        self.store.save(token)?;

        if let Some(user) = self.set_user_from_token(token) {
            tracing::info!(
                username = %user.username,
                user_id = user.id,
                role = %user.role,
                "Logged in"
            );
        }

        Ok(response)
    }

    /// Register a new account. The session is not touched.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<()> {
        let request = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };

        self.api.register(&request).await?;
        tracing::info!(username = %username, "Registered account");
        Ok(())
    }

    /// Drop the persisted token and publish the unauthenticated state.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "Failed to delete persisted token");
        }

        self.token.write().take();
        let previous = self.state.send_replace(None);

        if let Some(user) = previous {
            tracing::info!(username = %user.username, "Logged out");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.expire_if_due();
        self.state.borrow().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.expire_if_due();
        self.state.borrow().as_ref().is_some_and(User::is_admin)
    }

    pub fn current_user(&self) -> Option<User> {
        self.expire_if_due();
        self.state.borrow().clone()
    }

    /// Bearer token for outgoing requests while authenticated.
    pub fn bearer_token(&self) -> Option<String> {
        self.expire_if_due();
        self.token.read().as_ref().map(|active| active.value.clone())
    }

    /// Session state stream. The receiver starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.state.subscribe()
    }

    /// Log out once the held token has expired, when expiry checking is on.
    fn expire_if_due(&self) {
        if !self.options.check_expiry {
            return;
        }

        let expired_at = match self.token.read().as_ref() {
            Some(active) if exp_passed(active.exp, Utc::now()) => active.exp,
            _ => return,
        };

        tracing::info!(exp = ?expired_at, "Session token expired");
        self.logout();
    }

    fn decode(&self, token: &str) -> std::result::Result<TokenClaims, DecodeError> {
        let claims = decode_claims(token)?;

        match claims.exp {
            Some(exp) if self.options.check_expiry && exp_passed(claims.exp, Utc::now()) => {
                Err(DecodeError::Expired(exp))
            }
            _ => Ok(claims),
        }
    }

    fn set_user_from_token(&self, token: &str) -> Option<User> {
        let token = token.trim();
        let claims = match self.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding undecodable token");
                self.logout();
                return None;
            }
        };
        let exp = claims.exp;
        let user = claims.into_user();

        // A different user only replaces the current one via unauthenticated
        let switching = matches!(&*self.state.borrow(), Some(current) if *current != user);
        if switching {
            self.state.send_replace(None);
        }

        *self.token.write() = Some(ActiveToken {
            value: token.to_string(),
            exp,
        });
        self.state.send_replace(Some(user.clone()));
        Some(user)
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            store: Arc::clone(&self.store),
            token: Arc::clone(&self.token),
            state: Arc::clone(&self.state),
            login_gate: Arc::clone(&self.login_gate),
            options: self.options,
        }
    }
}
