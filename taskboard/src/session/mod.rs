//! Mock authentication.
//!
//! A [`SessionStore`] moves between [`SessionState`]s as logins and logouts
//! resolve. Who a user is comes from an [`IdentityProvider`]; where the
//! signed-in record lives is a [`UserStore`].

mod identity;
mod persistence;
mod state;
mod store;

pub use identity::{
    user_from_email, IdentityProvider, MockIdentityProvider, MOCK_PROVIDER_DISPLAY_NAME,
};
pub use persistence::{FileUserStore, MemoryUserStore, UserStore};
pub use state::SessionState;
pub use store::{
    provider_failed_message, SessionStore, LOGIN_FAILED_MESSAGE, LOGOUT_FAILED_MESSAGE,
};
