//! Authentication provider port
//!
//! Defines the interface to whatever issues and revokes identities.

use thiserror::Error;

use super::Subscription;
use crate::core::models::{Credentials, Identity};

/// Called with the current identity on subscribe and on every change
pub type AuthCallback = Box<dyn Fn(Option<Identity>) + Send + Sync>;

/// Errors from the authentication provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Wrong email or password
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The provider could not be reached or is not configured
    #[error("authentication unavailable: {0}")]
    Unavailable(String),
}

/// Authentication provider abstraction
///
/// Implementations must deliver the current state to a new subscriber
/// promptly, and notify every subscriber on each sign-in and sign-out.
pub trait AuthProvider: Send + Sync {
    /// Observe identity changes until the returned handle is dropped
    fn subscribe(&self, callback: AuthCallback) -> Subscription;

    /// Sign in with email and password
    fn sign_in(&self, credentials: &Credentials) -> Result<Identity, AuthError>;

    /// Sign out the current identity, if any
    fn sign_out(&self) -> Result<(), AuthError>;
}
