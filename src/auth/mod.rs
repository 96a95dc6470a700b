pub mod store;

pub use store::CredentialStore;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
}

/// Bearer credential plus the identity it was issued to. Controllers take a
/// copy at construction and never refresh it themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserInfo,
}

impl AuthSession {
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: UserInfo {
                email: email.into(),
            },
        }
    }

    /// The viewer identity used as customer, sender and query id.
    pub fn viewer(&self) -> &str {
        &self.user.email
    }
}
