//! Authenticated identity
//!
//! Issued and owned by the auth provider. The rest of the crate only ever
//! mirrors it.

use serde::{Deserialize, Serialize};

/// An authenticated principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-issued opaque user id
    pub uid: String,
    /// Account email, when the provider exposes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Identity {
    /// Create an identity
    #[must_use]
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
        }
    }
}

/// Login form input
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Plain-text password, verified by the provider and never stored
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
