//! SessionStore - login/logout state machine over an identity provider and a
//! persisted user record.

use super::identity::{IdentityProvider, MockIdentityProvider};
use super::persistence::{MemoryUserStore, UserStore};
use super::state::SessionState;
use crate::config::SessionConfig;
use crate::error::{Result, TaskboardError};
use crate::types::{Provider, User};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Message surfaced when an email login fails
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password";
/// Message surfaced when logout fails
pub const LOGOUT_FAILED_MESSAGE: &str = "Failed to log out";

/// Message surfaced when a provider login fails
pub fn provider_failed_message(provider: Provider) -> String {
    format!("Failed to login with {provider}")
}

/// Holds the session state and publishes every transition.
///
/// The store is meant to be created once by the process entry point and
/// handed to whatever presents it. Only one login or logout may be in flight;
/// a second call while one is pending gets [`TaskboardError::SessionBusy`].
/// Dropping a pending call puts back the state it started from.
pub struct SessionStore {
    state: watch::Sender<SessionState>,
    identity: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserStore>,
}

impl SessionStore {
    pub fn new(identity: Arc<dyn IdentityProvider>, users: Arc<dyn UserStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Unauthenticated);
        Self {
            state,
            identity,
            users,
        }
    }

    /// A mock-backed store with the configured delays
    pub fn mock(config: &SessionConfig, users: Arc<dyn UserStore>) -> Self {
        Self::new(Arc::new(MockIdentityProvider::from_config(config)), users)
    }

    /// A mock-backed store with no delays and an in-memory user slot
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MockIdentityProvider::immediate()),
            Arc::new(MemoryUserStore::new()),
        )
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receive every subsequent state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Pick up a persisted user at startup, without any delay
    pub async fn restore_session(&self) -> Option<User> {
        match self.users.load().await {
            Ok(Some(user)) => {
                info!(user_id = %user.id, "restored session");
                self.transition(SessionState::Authenticated { user: user.clone() });
                Some(user)
            }
            Ok(None) => {
                debug!("no session to restore");
                self.transition(SessionState::Unauthenticated);
                None
            }
            Err(error) => {
                warn!(%error, "ignoring unreadable session record");
                self.transition(SessionState::Unauthenticated);
                None
            }
        }
    }

    /// Email/password login
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let pending = self.begin()?;
        info!(email, "logging in");

        let result = async {
            let user = self.identity.authenticate(email, password).await?;
            self.users.save(&user).await?;
            Ok::<_, TaskboardError>(user)
        }
        .await;

        match result {
            Ok(user) => {
                info!(user_id = %user.id, "logged in");
                pending.finish(SessionState::Authenticated { user: user.clone() });
                Ok(user)
            }
            Err(error) => {
                warn!(%error, email, "login failed");
                pending.finish(SessionState::Error {
                    message: LOGIN_FAILED_MESSAGE.to_string(),
                });
                Err(TaskboardError::AuthenticationFailed {
                    message: LOGIN_FAILED_MESSAGE.to_string(),
                })
            }
        }
    }

    /// Login through an external provider
    pub async fn login_with_provider(&self, provider: Provider) -> Result<User> {
        let pending = self.begin()?;
        info!(%provider, "logging in with provider");

        let result = async {
            let user = self.identity.authenticate_with(provider).await?;
            self.users.save(&user).await?;
            Ok::<_, TaskboardError>(user)
        }
        .await;

        match result {
            Ok(user) => {
                info!(%provider, user_id = %user.id, "logged in");
                pending.finish(SessionState::Authenticated { user: user.clone() });
                Ok(user)
            }
            Err(error) => {
                warn!(%error, %provider, "provider login failed");
                let message = provider_failed_message(provider);
                pending.finish(SessionState::Error {
                    message: message.clone(),
                });
                Err(TaskboardError::ProviderLoginFailed {
                    provider: provider.to_string(),
                    message,
                })
            }
        }
    }

    /// Sign out and clear the persisted record
    pub async fn logout(&self) -> Result<()> {
        let user = self.current_user();
        let pending = self.begin()?;
        info!(user_id = ?user.as_ref().map(|u| u.id.to_string()), "logging out");

        let result = async {
            self.identity.sign_out(user.as_ref()).await?;
            self.users.clear().await
        }
        .await;

        match result {
            Ok(()) => {
                pending.finish(SessionState::Unauthenticated);
                Ok(())
            }
            Err(error) => {
                warn!(%error, "logout failed");
                pending.finish(SessionState::Error {
                    message: LOGOUT_FAILED_MESSAGE.to_string(),
                });
                Err(error)
            }
        }
    }

    /// Enter `Authenticating`, unless something is already in flight
    fn begin(&self) -> Result<InFlight<'_>> {
        let mut previous = None;
        self.state.send_if_modified(|state| {
            if state.is_loading() {
                false
            } else {
                previous = Some(std::mem::replace(state, SessionState::Authenticating));
                true
            }
        });

        match previous {
            Some(previous) => Ok(InFlight {
                state: &self.state,
                previous: Some(previous),
            }),
            None => {
                warn!("rejected session change while another is in flight");
                Err(TaskboardError::SessionBusy)
            }
        }
    }

    fn transition(&self, next: SessionState) {
        debug!(state = ?next, "session transition");
        self.state.send_replace(next);
    }
}

/// A login or logout holding the store in `Authenticating`.
///
/// Dropped without [`InFlight::finish`] (the future was cancelled), it puts
/// back the state that was current before the call.
struct InFlight<'a> {
    state: &'a watch::Sender<SessionState>,
    previous: Option<SessionState>,
}

impl InFlight<'_> {
    fn finish(mut self, next: SessionState) {
        self.previous = None;
        debug!(state = ?next, "session transition");
        self.state.send_replace(next);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            warn!(state = ?previous, "session change abandoned, restoring state");
            self.state.send_replace(previous);
        }
    }
}
