//! Session state machine states

use crate::types::User;
use serde::Serialize;

/// Where the session currently stands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// No user; the initial state and the state after logout
    #[default]
    Unauthenticated,
    /// A login or logout is in flight
    Authenticating,
    /// A user is signed in
    Authenticated { user: User },
    /// The last login failed; no user is signed in
    Error { message: String },
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated { user } => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// True while a login or logout is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Authenticating)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}
