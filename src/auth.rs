//! Admin sessions.
//!
//! A Discord user becomes an admin for the lifetime of the process by signing in
//! with the shared passphrase. The engine never consults this module; only the
//! bot's admin commands do.

use crate::{
    config::AdminConfig,
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::{RwLock, broadcast};
use tracing::{info, warn};

/// An active admin session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminSession {
    /// Discord user ID
    pub user_id: u64,
    /// When the session started
    pub signed_in_at: DateTime<Utc>,
}

/// Session change notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user signed in
    SignedIn(u64),
    /// The user signed out
    SignedOut(u64),
}

/// Tracks which Discord users are signed in as admins.
#[derive(Debug)]
pub struct AdminAuth {
    config: AdminConfig,
    sessions: RwLock<HashMap<u64, AdminSession>>,
    events: broadcast::Sender<SessionEvent>,
}

impl AdminAuth {
    /// Creates an empty session table.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        if config.passphrase.is_none() {
            warn!("ADMIN_PASSPHRASE is not set; admin sign-in is disabled");
        }
        let (events, _) = broadcast::channel(16);
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
            events,
        }
    }

    /// The user's session, if signed in.
    pub async fn current_user(&self, user_id: u64) -> Option<AdminSession> {
        self.sessions.read().await.get(&user_id).cloned()
    }

    /// Signs the user in if the passphrase matches and the user is allowed.
    ///
    /// Signing in again while already signed in keeps the original session.
    ///
    /// # Errors
    /// [`Error::Unauthorized`] for a wrong passphrase, a user outside the
    /// allow-list, or when no passphrase is configured.
    pub async fn sign_in(&self, user_id: u64, passphrase: &str) -> Result<AdminSession> {
        let Some(expected) = self.config.passphrase.as_deref() else {
            return Err(Error::Unauthorized);
        };
        if passphrase != expected || !self.config.is_allowed(user_id) {
            warn!("Rejected admin sign-in for user {}", user_id);
            return Err(Error::Unauthorized);
        }

        let session = {
            let mut sessions = self.sessions.write().await;
            sessions
                .entry(user_id)
                .or_insert_with(|| AdminSession {
                    user_id,
                    signed_in_at: Utc::now(),
                })
                .clone()
        };
        info!("User {} signed in as admin", user_id);
        let _ = self.events.send(SessionEvent::SignedIn(user_id));
        Ok(session)
    }

    /// Ends the user's session. Returns false if they were not signed in.
    pub async fn sign_out(&self, user_id: u64) -> bool {
        let removed = self.sessions.write().await.remove(&user_id).is_some();
        if removed {
            info!("User {} signed out", user_id);
            let _ = self.events.send(SessionEvent::SignedOut(user_id));
        }
        removed
    }

    /// The user's session, or [`Error::Unauthorized`].
    pub async fn require_admin(&self, user_id: u64) -> Result<AdminSession> {
        self.current_user(user_id).await.ok_or(Error::Unauthorized)
    }

    /// Receives every subsequent sign-in and sign-out.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
