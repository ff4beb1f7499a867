//! Signed-in user record

use super::ids::UserId;
use crate::error::TaskboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a user signed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Email,
    Google,
    Facebook,
    Github,
}

impl Provider {
    pub const ALL: [Provider; 4] = [Self::Email, Self::Google, Self::Facebook, Self::Github];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Google => "google",
            Self::Facebook => "facebook",
            Self::Github => "github",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| {
                TaskboardError::invalid_value("provider", format!("unknown provider '{s}'"))
            })
    }
}

/// The persisted user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
}

impl User {
    pub fn new(id: impl Into<UserId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: None,
            avatar: None,
            provider: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Name to show for this user, falling back to the email address
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!("GitHub".parse::<Provider>().unwrap(), Provider::Github);
        assert!("myspace".parse::<Provider>().is_err());
    }

    #[test]
    fn test_user_serialization_skips_absent_fields() {
        let user = User::new("1", "bob@x.com")
            .with_name("bob")
            .with_provider(Provider::Email);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["provider"], "email");
        assert!(json.get("avatar").is_none());

        let parsed: User = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, user);
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(User::new("1", "a@b.c").display_name(), "a@b.c");
        assert_eq!(User::new("1", "a@b.c").with_name("A").display_name(), "A");
    }
}
