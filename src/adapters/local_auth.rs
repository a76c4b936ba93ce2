//! Single-account auth provider
//!
//! Authenticates one admin account configured locally, with the password
//! kept as an argon2 PHC string. The signed-in identity lives in memory
//! only, so restarting the server signs everyone out. The server gives each
//! visitor its own provider, so one browser signing in signs in no other.

use std::sync::{Mutex, PoisonError};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::subscribers::Subscribers;
use crate::core::models::{Credentials, Identity};
use crate::core::ports::{AuthCallback, AuthError, AuthProvider, Subscription};

/// Hash `password` into an argon2 PHC string for the config file
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string())
}

fn verify_password(hash: &str, password: &str) -> bool {
    PasswordHash::new(hash)
        .is_ok_and(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

/// The one account allowed into the admin console
#[derive(Clone, PartialEq, Eq)]
pub struct AdminAccount {
    /// Login email
    pub email: String,
    /// Argon2 PHC hash of the password
    pub password_hash: String,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount").field("email", &self.email).finish_non_exhaustive()
    }
}

/// [`AuthProvider`] backed by a single configured account
#[derive(Debug, Default)]
pub struct LocalAuthProvider {
    account: Option<AdminAccount>,
    current: Mutex<Option<Identity>>,
    subscribers: Subscribers<Option<Identity>>,
}

impl LocalAuthProvider {
    /// A provider for `account`; `None` rejects every sign-in
    #[must_use]
    pub fn new(account: Option<AdminAccount>) -> Self {
        if account.is_none() {
            log::debug!("no admin account configured; sign-in is disabled");
        }
        Self {
            account,
            current: Mutex::new(None),
            subscribers: Subscribers::default(),
        }
    }

    fn set_current(&self, identity: Option<Identity>) {
        let changed = {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            let changed = *current != identity;
            current.clone_from(&identity);
            changed
        };
        if changed {
            self.subscribers.publish(identity);
        }
    }
}

impl AuthProvider for LocalAuthProvider {
    fn subscribe(&self, callback: AuthCallback) -> Subscription {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        self.subscribers.add_with_initial(callback, current.clone())
    }

    fn sign_in(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let account = self
            .account
            .as_ref()
            .ok_or_else(|| AuthError::Unavailable("no admin account configured".to_string()))?;

        let email = credentials.email.trim();
        if !email.eq_ignore_ascii_case(&account.email)
            || !verify_password(&account.password_hash, &credentials.password)
        {
            log::warn!("rejected sign-in for {email}");
            return Err(AuthError::InvalidCredentials);
        }

        let identity = Identity::new(format!("local:{}", account.email), Some(account.email.clone()));
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        self.set_current(None);
        Ok(())
    }
}
