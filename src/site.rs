//! Site state
//!
//! [`Site`] wires the collaborators to the core services and owns the state
//! of one browser: the session mirror, the route guard, and one [`Section`]
//! per content kind. It is driven from a single thread; call [`Site::pump`]
//! between requests to apply queued notifications. The server keeps one
//! site per visitor in [`crate::visitors::Visitors`].

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::adapters::{JsonFileStore, LocalAuthProvider, OutboxMailer};
use crate::config::SiteConfig;
use crate::core::models::{
    ContentKind, Credentials, DocumentId, EducationEntry, FormError, Identity, Project, Skill,
};
use crate::core::ports::{AuthError, AuthProvider, DocumentStore, Mailer, StoreError};
use crate::core::services::{
    AdminView, ContactMessage, ContactService, ContactSettings, ContentRepository, ContentStats,
    Delivery, FormController, LiveCollection, Outcome, Route, RouteGuard, SIGN_OUT_TIMEOUT,
    SessionState, SessionStore, Snapshot, SubmitOutcome,
};

/// How long sign-in may take to show up in the session store
const SIGN_IN_TIMEOUT: Duration = Duration::from_secs(2);

/// Errors from site operations that are not reported as status lines
#[derive(Debug, Error)]
pub enum SiteError {
    /// Draft validation or state machine misuse
    #[error(transparent)]
    Form(#[from] FormError),

    /// Sign-in rejected
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Store failure outside a form submit
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No entry with this id in the current snapshot
    #[error("no {label} with id {id}")]
    UnknownEntry {
        /// Content label
        label: &'static str,
        /// Requested id
        id: DocumentId,
    },
}

/// Everything the site holds for one content kind
#[derive(Debug)]
pub struct Section<K: ContentKind> {
    repo: ContentRepository<K>,
    live: LiveCollection<K>,
    form: FormController<K>,
}

impl<K: ContentKind> Section<K> {
    /// Subscribe to `store` and start with an idle form
    pub fn open(store: Arc<dyn DocumentStore>) -> Self {
        let repo = ContentRepository::new(store);
        let live = LiveCollection::open(&repo);
        Self {
            repo,
            live,
            form: FormController::new(),
        }
    }

    /// The repository
    #[must_use]
    pub const fn repo(&self) -> &ContentRepository<K> {
        &self.repo
    }

    /// Mirror as of the last pump
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot<K> {
        self.live.snapshot()
    }

    /// Whether a snapshot has arrived since the section mounted
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.live.is_loaded()
    }

    /// The form controller
    #[must_use]
    pub const fn form(&self) -> &FormController<K> {
        &self.form
    }

    /// The form controller, mutably
    pub const fn form_mut(&mut self) -> &mut FormController<K> {
        &mut self.form
    }

    /// Apply the latest snapshot; returns whether one arrived
    pub fn refresh(&mut self) -> bool {
        self.live.refresh()
    }

    /// Start over with a fresh subscription, as when an admin view mounts
    pub fn remount(&mut self) {
        self.live.resubscribe(&self.repo);
    }

    /// Open the editor on the entry `id` from the current snapshot
    pub fn begin_edit(&mut self, id: &DocumentId) -> Result<(), SiteError> {
        let item = self
            .live
            .snapshot()
            .get(id)
            .map(|entry| entry.item.clone())
            .ok_or_else(|| SiteError::UnknownEntry {
                label: K::LABEL,
                id: id.clone(),
            })?;
        self.form.begin_edit(id.clone(), &item)?;
        Ok(())
    }

    /// Submit the open draft
    pub fn submit(&mut self) -> SubmitOutcome {
        self.form.submit(&self.repo)
    }

    /// Delete `id`, returning a status line
    ///
    /// Callers confirm with the operator before calling this.
    pub fn delete(&self, id: &DocumentId) -> Result<String, String> {
        match self.repo.delete(id) {
            Ok(()) => Ok(format!("Deleted {} {id}", K::LABEL)),
            Err(e) => {
                log::warn!("deleting {} {id} failed: {e}", K::LABEL);
                Err(format!("Could not delete {}: {e}", K::LABEL))
            },
        }
    }
}

/// The running site
pub struct Site {
    auth: Arc<dyn AuthProvider>,
    session: SessionStore,
    guard: RouteGuard,
    /// Projects
    pub projects: Section<Project>,
    /// Skills
    pub skills: Section<Skill>,
    /// Education and certifications
    pub education: Section<EducationEntry>,
    contact: ContactService,
    #[cfg(feature = "watch")]
    _watcher: Option<crate::adapters::StoreWatcher>,
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("session", &self.session)
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

impl Site {
    /// Wire a site from its collaborators
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn DocumentStore>,
        mailer: Arc<dyn Mailer>,
        contact: ContactSettings,
    ) -> Self {
        let session = SessionStore::start(auth.as_ref());
        let mut site = Self {
            projects: Section::open(Arc::clone(&store)),
            skills: Section::open(Arc::clone(&store)),
            education: Section::open(store),
            contact: ContactService::new(mailer, contact),
            auth,
            session,
            guard: RouteGuard::new(),
            #[cfg(feature = "watch")]
            _watcher: None,
        };
        site.pump();
        site
    }

    /// Build the site described by `config` with the local adapters
    pub fn from_config(config: &SiteConfig) -> anyhow::Result<Self> {
        let backend = Backend::open(config)?;
        let auth = Arc::new(LocalAuthProvider::new(config.admin.account()));
        let site = Self::new(auth, backend.store, backend.mailer, config.contact.settings());
        #[cfg(feature = "watch")]
        let site = Self {
            _watcher: backend.watcher,
            ..site
        };
        Ok(site)
    }

    /// Apply queued session and snapshot notifications
    ///
    /// Returns whether anything changed.
    pub fn pump(&mut self) -> bool {
        let session = self.session.pump();
        let projects = self.projects.refresh();
        let skills = self.skills.refresh();
        let education = self.education.refresh();
        session || projects || skills || education
    }

    /// Current session state
    #[must_use]
    pub const fn session(&self) -> &SessionState {
        self.session.state()
    }

    /// Navigate to `path`; `None` for unknown paths
    pub fn navigate(&mut self, path: &str) -> Option<Outcome> {
        let route = Route::parse(path)?;
        let outcome = self.guard.navigate(route, &mut self.session, self.auth.as_ref());
        if let Outcome::Render {
            route: Route::Admin { page },
        } = &outcome
        {
            self.remount(*page);
        }
        Some(outcome)
    }

    /// Re-run the guard on the current location after a session change
    pub fn reevaluate(&mut self) -> Outcome {
        self.guard.reevaluate(&mut self.session, self.auth.as_ref())
    }

    /// The route guard
    #[must_use]
    pub const fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// Sign in and wait for the session store to show it
    pub fn login(&mut self, credentials: &Credentials) -> Result<Identity, SiteError> {
        let identity = self.auth.sign_in(credentials)?;
        if !self.session.wait_for(SIGN_IN_TIMEOUT, SessionState::is_authenticated) {
            log::warn!("sign-in for {} not yet visible in the session", identity.uid);
        }
        Ok(identity)
    }

    /// Sign out and land on the login view
    pub fn logout(&mut self) -> Outcome {
        if let Err(e) = self.auth.sign_out() {
            log::warn!("sign-out failed: {e}");
        }
        self.session.wait_for(SIGN_OUT_TIMEOUT, |state| state.identity.is_none());
        self.guard.navigate(Route::Login, &mut self.session, self.auth.as_ref())
    }

    /// Whether admin operations are allowed right now
    pub fn is_admin(&mut self) -> bool {
        self.session.pump();
        self.session.state().is_authenticated()
    }

    /// Dashboard counts, read once from the store
    pub fn stats(&self) -> Result<ContentStats, StoreError> {
        ContentStats::collect(
            self.projects.repo(),
            self.skills.repo(),
            self.education.repo(),
        )
    }

    /// Validate and deliver a contact message
    pub fn contact(&self, message: &ContactMessage) -> Result<Delivery, SiteError> {
        Ok(self.contact.send(message)?)
    }

    fn remount(&mut self, page: AdminView) {
        match page {
            AdminView::Projects => self.projects.remount(),
            AdminView::Skills => self.skills.remount(),
            AdminView::Education => self.education.remount(),
            AdminView::Dashboard => {},
        }
    }
}

/// Store and mailer described by a config
pub(crate) struct Backend {
    pub(crate) store: Arc<dyn DocumentStore>,
    pub(crate) mailer: Arc<dyn Mailer>,
    #[cfg(feature = "watch")]
    pub(crate) watcher: Option<crate::adapters::StoreWatcher>,
}

impl Backend {
    pub(crate) fn open(config: &SiteConfig) -> anyhow::Result<Self> {
        let store = JsonFileStore::open(config.storage.data_dir())?;

        #[cfg(feature = "watch")]
        let watcher = if config.storage.watch {
            Some(store.watch()?)
        } else {
            None
        };
        #[cfg(not(feature = "watch"))]
        if config.storage.watch {
            log::warn!("storage.watch is set but folio was built without the watch feature");
        }

        Ok(Self {
            store: Arc::new(store),
            mailer: mailer_from_config(config),
            #[cfg(feature = "watch")]
            watcher,
        })
    }
}

fn mailer_from_config(config: &SiteConfig) -> Arc<dyn Mailer> {
    match &config.contact.endpoint {
        #[cfg(feature = "mailer")]
        Some(endpoint) => Arc::new(crate::adapters::HttpMailer::new(endpoint.clone())),
        #[cfg(not(feature = "mailer"))]
        Some(endpoint) => {
            log::warn!("contact.endpoint {endpoint} ignored; built without the mailer feature");
            Arc::new(OutboxMailer::new(config.contact.outbox()))
        },
        None => Arc::new(OutboxMailer::new(config.contact.outbox())),
    }
}
