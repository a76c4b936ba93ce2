//! Session store
//!
//! Mirrors the auth provider's current identity as a value the rest of the
//! site observes. The store subscribes once when started and unsubscribes
//! when dropped; it has no write path of its own.

use std::time::{Duration, Instant};

use serde::Serialize;

use super::feed::Feed;
use crate::core::models::Identity;
use crate::core::ports::AuthProvider;

/// Current authentication status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// Who is signed in, if anyone
    pub identity: Option<Identity>,
    /// False until the provider's first notification arrives
    pub ready: bool,
}

impl SessionState {
    /// The state before any notification
    #[must_use]
    pub const fn checking() -> Self {
        Self {
            identity: None,
            ready: false,
        }
    }

    /// Ready with an identity present
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.ready && self.identity.is_some()
    }
}

/// Observable mirror of the auth provider's state
#[derive(Debug)]
pub struct SessionStore {
    feed: Feed<Option<Identity>>,
    state: SessionState,
    changes: u64,
}

impl SessionStore {
    /// Subscribe to `auth` and start in the checking state
    pub fn start(auth: &dyn AuthProvider) -> Self {
        let feed = Feed::open(|callback| auth.subscribe(callback));
        Self {
            feed,
            state: SessionState::checking(),
            changes: 0,
        }
    }

    /// Apply every queued notification in arrival order
    ///
    /// Returns whether any notification was applied.
    pub fn pump(&mut self) -> bool {
        let pending = self.feed.drain();
        let changed = !pending.is_empty();
        for identity in pending {
            self.apply(identity);
        }
        changed
    }

    /// Pump until `accept` holds or `timeout` elapses
    ///
    /// Returns whether the state was accepted.
    pub fn wait_for(&mut self, timeout: Duration, accept: impl Fn(&SessionState) -> bool) -> bool {
        self.pump();
        let deadline = Instant::now() + timeout;
        while !accept(&self.state) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.feed.next_timeout(remaining) {
                Some(identity) => self.apply(identity),
                None => return accept(&self.state),
            }
        }
        true
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Number of notifications applied so far
    ///
    /// Observers compare counts to detect changes without diffing.
    #[must_use]
    pub const fn changes(&self) -> u64 {
        self.changes
    }

    /// Unsubscribe from the provider
    pub fn shutdown(self) {
        log::debug!("session store shut down after {} notifications", self.changes);
    }

    fn apply(&mut self, identity: Option<Identity>) {
        match (&self.state.identity, &identity) {
            (None, Some(id)) => log::info!("signed in as {}", id.uid),
            (Some(id), None) => log::info!("signed out {}", id.uid),
            _ => {},
        }
        self.state = SessionState {
            identity,
            ready: true,
        };
        self.changes += 1;
    }
}
