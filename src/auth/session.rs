//! Client-side session context.
//!
//! A `SessionStore` is created by the caller and handed to the API client,
//! so tests and multiple clients never share hidden global state. All
//! mutations go through one watch channel; observers see every transition
//! in order.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use super::dto::{LoginResponse, User};
use crate::error::{ApiError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub access_token: Option<String>,
    pub user: Option<User>,
    /// Bumped on every login, refresh and logout.
    pub epoch: u64,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionState>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn access_token(&self) -> Option<String> {
        self.tx.borrow().access_token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.tx.borrow().user.clone()
    }

    pub fn epoch(&self) -> u64 {
        self.tx.borrow().epoch
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated()
    }

    /// The current user, or `NotAuthenticated` when nobody is logged in.
    pub fn require_user(&self) -> Result<User> {
        self.user().ok_or(ApiError::NotAuthenticated)
    }

    /// Stores a fresh token. A response without a user keeps the known one.
    pub fn login_success(&self, res: LoginResponse) {
        self.tx.send_modify(|s| {
            s.access_token = Some(res.access_token);
            if let Some(user) = res.user {
                s.user = Some(user);
            }
            s.epoch += 1;
        });
        let state = self.tx.borrow();
        debug!(
            epoch = state.epoch,
            user_no = state.user.as_ref().map(|u| u.user_no),
            "session updated"
        );
    }

    pub fn logout(&self) {
        let was_authenticated = self.is_authenticated();
        self.tx.send_modify(|s| {
            s.access_token = None;
            s.user = None;
            s.epoch += 1;
        });
        if was_authenticated {
            info!("session cleared");
        }
    }
}
