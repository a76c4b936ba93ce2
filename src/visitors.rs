//! Per-visitor sites
//!
//! Each browser gets its own [`Site`]: its own sign-in, session mirror,
//! route guard and drafts. Signing in, or being signed out by opening the
//! public view, only ever affects the visitor who did it. Visitors share
//! the document store and the mailer and are told apart by an opaque token
//! the server keeps in a cookie.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::adapters::LocalAuthProvider;
use crate::config::SiteConfig;
use crate::core::ports::{AuthProvider, DocumentStore, Mailer};
use crate::core::services::ContactSettings;
use crate::site::{Backend, Site};

/// Visitors idle this long are forgotten
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Most visitors kept at once; the least recently seen is dropped first
pub const MAX_VISITORS: usize = 256;

/// Builds the auth provider for a new visitor
pub type AuthFactory = Box<dyn Fn() -> Arc<dyn AuthProvider> + Send>;

struct Visitor {
    site: Site,
    last_seen: Instant,
}

/// One request's visitor
#[derive(Debug)]
pub struct Visit<'a> {
    /// Token identifying the visitor
    pub token: String,
    /// Whether the token was issued by this request
    pub issued: bool,
    /// The visitor's site
    pub site: &'a mut Site,
}

/// All sites the server is keeping, by visitor token
pub struct Visitors {
    auth: AuthFactory,
    store: Arc<dyn DocumentStore>,
    mailer: Arc<dyn Mailer>,
    contact: ContactSettings,
    sites: HashMap<String, Visitor>,
    idle: Duration,
    capacity: usize,
    #[cfg(feature = "watch")]
    _watcher: Option<crate::adapters::StoreWatcher>,
}

impl std::fmt::Debug for Visitors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Visitors")
            .field("visitors", &self.sites.len())
            .field("idle", &self.idle)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

fn new_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

impl Visitors {
    /// Share `store` and `mailer` between visitors, each signing in through
    /// its own provider from `auth`
    pub fn new(
        auth: impl Fn() -> Arc<dyn AuthProvider> + Send + 'static,
        store: Arc<dyn DocumentStore>,
        mailer: Arc<dyn Mailer>,
        contact: ContactSettings,
    ) -> Self {
        Self {
            auth: Box::new(auth),
            store,
            mailer,
            contact,
            sites: HashMap::new(),
            idle: IDLE_TIMEOUT,
            capacity: MAX_VISITORS,
            #[cfg(feature = "watch")]
            _watcher: None,
        }
    }

    /// Visitors described by `config`, signing in against its admin account
    pub fn from_config(config: &SiteConfig) -> anyhow::Result<Self> {
        let backend = Backend::open(config)?;
        let account = config.admin.account();
        let auth = move || -> Arc<dyn AuthProvider> { Arc::new(LocalAuthProvider::new(account.clone())) };
        let visitors = Self::new(auth, backend.store, backend.mailer, config.contact.settings());
        #[cfg(feature = "watch")]
        let visitors = Self {
            _watcher: backend.watcher,
            ..visitors
        };
        Ok(visitors)
    }

    /// Override the idle timeout and the visitor limit
    #[must_use]
    pub fn with_limits(mut self, idle: Duration, capacity: usize) -> Self {
        self.idle = idle;
        self.capacity = capacity.max(1);
        self
    }

    /// The visitor holding `token`, or a new one when it is unknown
    pub fn enter(&mut self, token: Option<&str>) -> Visit<'_> {
        let now = Instant::now();
        self.expire(now);
        let known = token.filter(|token| self.sites.contains_key(*token));
        let issued = known.is_none();
        if issued {
            self.make_room();
        }
        let token = known.map_or_else(new_token, String::from);

        let visitor = match self.sites.entry(token.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                log::debug!("new visitor");
                let site = Site::new(
                    (self.auth)(),
                    Arc::clone(&self.store),
                    Arc::clone(&self.mailer),
                    self.contact.clone(),
                );
                entry.insert(Visitor {
                    site,
                    last_seen: now,
                })
            },
        };
        visitor.last_seen = now;
        Visit {
            token,
            issued,
            site: &mut visitor.site,
        }
    }

    /// Move the visitor holding `token` to a fresh token
    ///
    /// Done on sign-in so a token seen before then no longer works.
    pub fn rotate(&mut self, token: &str) -> Option<String> {
        let visitor = self.sites.remove(token)?;
        let fresh = new_token();
        self.sites.insert(fresh.clone(), visitor);
        Some(fresh)
    }

    /// The site of the visitor holding `token`
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&Site> {
        self.sites.get(token).map(|visitor| &visitor.site)
    }

    /// Apply queued notifications for every visitor
    pub fn pump(&mut self) -> bool {
        self.sites
            .values_mut()
            .fold(false, |changed, visitor| visitor.site.pump() || changed)
    }

    /// Number of visitors kept
    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether no visitor is kept
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    fn expire(&mut self, now: Instant) {
        let idle = self.idle;
        let before = self.sites.len();
        self.sites
            .retain(|_, visitor| now.duration_since(visitor.last_seen) < idle);
        let expired = before - self.sites.len();
        if expired > 0 {
            log::debug!("forgot {expired} idle visitors");
        }
    }

    fn make_room(&mut self) {
        while self.sites.len() >= self.capacity {
            let Some(oldest) = self
                .sites
                .iter()
                .min_by_key(|(_, visitor)| visitor.last_seen)
                .map(|(token, _)| token.clone())
            else {
                return;
            };
            log::debug!("visitor limit reached; dropping the least recent");
            self.sites.remove(&oldest);
        }
    }
}
