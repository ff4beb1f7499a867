//! Identity resolution behind the session store.
//!
//! [`MockIdentityProvider`] accepts any credentials after a fixed delay. A
//! real OAuth/OIDC client slots in by implementing [`IdentityProvider`].

use crate::config::SessionConfig;
use crate::error::{Result, TaskboardError};
use crate::types::{Provider, User, UserId};
use async_trait::async_trait;
use rand::distr::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::debug;

/// Display name given to every mock provider login
pub const MOCK_PROVIDER_DISPLAY_NAME: &str = "Demo User";

/// Resolves credentials or an external provider to a [`User`]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Email/password login
    async fn authenticate(&self, email: &str, password: &str) -> Result<User>;

    /// Login through an external provider
    async fn authenticate_with(&self, provider: Provider) -> Result<User>;

    /// End the session with the identity backend
    async fn sign_out(&self, user: Option<&User>) -> Result<()>;
}

/// Accepts everything after a simulated round-trip
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    login_delay: Duration,
    logout_delay: Duration,
}

impl MockIdentityProvider {
    pub fn new(login_delay: Duration, logout_delay: Duration) -> Self {
        Self {
            login_delay,
            logout_delay,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.login_delay(), config.logout_delay())
    }

    /// No delays at all
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn authenticate(&self, email: &str, _password: &str) -> Result<User> {
        tokio::time::sleep(self.login_delay).await;
        Ok(user_from_email(email))
    }

    async fn authenticate_with(&self, provider: Provider) -> Result<User> {
        if provider == Provider::Email {
            return Err(TaskboardError::invalid_value(
                "provider",
                "email login requires credentials",
            ));
        }

        tokio::time::sleep(self.login_delay).await;
        let user = synthesize_provider_user(provider);
        debug!(%provider, user_id = %user.id, "synthesized provider user");
        Ok(user)
    }

    async fn sign_out(&self, _user: Option<&User>) -> Result<()> {
        tokio::time::sleep(self.logout_delay).await;
        Ok(())
    }
}

/// The user record for an email login. Deterministic in the email: the id is
/// a digest of the normalized address and the name is its local part.
pub fn user_from_email(email: &str) -> User {
    let name = email.split('@').next().unwrap_or(email);
    User::new(email_user_id(email), email)
        .with_name(name)
        .with_provider(Provider::Email)
}

fn email_user_id(email: &str) -> UserId {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    let hex: String = digest.iter().take(8).map(|b| format!("{b:02x}")).collect();
    UserId::from_string(hex)
}

fn synthesize_provider_user(provider: Provider) -> User {
    let mut rng = rand::rng();
    let tag: String = (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect();
    let seed: u64 = rng.random();

    User::new(UserId::new(), format!("user_{tag}@example.com"))
        .with_name(MOCK_PROVIDER_DISPLAY_NAME)
        .with_avatar(format!(
            "https://api.dicebear.com/7.x/avataaars/svg?seed={seed}"
        ))
        .with_provider(provider)
}
