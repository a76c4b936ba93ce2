//! Route guard
//!
//! Decides what a navigation renders given the session state. The decision
//! itself is the pure function [`decide`]; [`RouteGuard`] carries it out,
//! performing the redirect or sign-out after the navigation.
//!
//! ## Policy
//!
//! - Restricted views render only when the session is ready and an
//!   identity is present. While checking, a placeholder is shown.
//! - Unauthenticated access redirects to the login view, replacing the
//!   history entry.
//! - Entering a public view while signed in signs the identity out first.
//!   Admin and public browsing never share one session.

use std::time::Duration;

use serde::Serialize;

use super::session::{SessionState, SessionStore};
use crate::core::ports::AuthProvider;

/// Path of the login view
pub const LOGIN_PATH: &str = "/admin/login";

/// How long a forced sign-out may take to show up in the session store
pub const SIGN_OUT_TIMEOUT: Duration = Duration::from_secs(2);

/// Admin console views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminView {
    /// Content counts
    Dashboard,
    /// Project editor
    Projects,
    /// Skill editor
    Skills,
    /// Education editor
    Education,
}

impl AdminView {
    /// Path segment after `/admin/`
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Education => "education",
        }
    }
}

/// A navigable view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Route {
    /// The public single-page site, optionally scrolled to a section
    Public {
        /// Fragment after `#`, e.g. `projects`
        section: Option<String>,
    },
    /// The login view
    Login,
    /// A restricted admin view
    Admin {
        /// Which admin page
        page: AdminView,
    },
}

/// Access class of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone; forces sign-out
    Public,
    /// Anyone; never forces sign-out
    Login,
    /// Authenticated only
    Restricted,
}

impl Route {
    /// Parse a request path; `None` for unknown paths
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let (path, fragment) = match path.split_once('#') {
            Some((p, f)) => (p, Some(f)),
            None => (path, None),
        };
        let path = path.split_once('?').map_or(path, |(p, _)| p);
        let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };

        match path {
            "" | "/" | "/index.html" => Some(Self::Public {
                section: fragment.filter(|f| !f.is_empty()).map(String::from),
            }),
            LOGIN_PATH => Some(Self::Login),
            "/admin" | "/admin/dashboard" => Some(Self::admin(AdminView::Dashboard)),
            "/admin/projects" => Some(Self::admin(AdminView::Projects)),
            "/admin/skills" => Some(Self::admin(AdminView::Skills)),
            "/admin/education" => Some(Self::admin(AdminView::Education)),
            _ => None,
        }
    }

    /// An admin route
    #[must_use]
    pub const fn admin(page: AdminView) -> Self {
        Self::Admin { page }
    }

    /// Canonical path of this route
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Public { section: None } => "/".to_string(),
            Self::Public {
                section: Some(section),
            } => format!("/#{section}"),
            Self::Login => LOGIN_PATH.to_string(),
            Self::Admin { page } => format!("/admin/{}", page.slug()),
        }
    }

    /// Access class
    #[must_use]
    pub const fn access(&self) -> Access {
        match self {
            Self::Public { .. } => Access::Public,
            Self::Login => Access::Login,
            Self::Admin { .. } => Access::Restricted,
        }
    }
}

/// What a navigation should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Session not known yet; show a neutral placeholder
    Placeholder,
    /// Replace the history entry with the login view
    Redirect {
        /// Path that was requested
        from: String,
    },
    /// Render the requested view
    Render,
    /// Sign out, then render the requested view
    SignOutThenRender,
}

/// Decide a navigation from the route and session state alone
#[must_use]
pub fn decide(route: &Route, state: &SessionState) -> Decision {
    match route.access() {
        Access::Login => Decision::Render,
        Access::Public if state.identity.is_some() => Decision::SignOutThenRender,
        Access::Public => Decision::Render,
        Access::Restricted if !state.ready => Decision::Placeholder,
        Access::Restricted if state.identity.is_some() => Decision::Render,
        Access::Restricted => Decision::Redirect { from: route.path() },
    }
}

/// Result of a navigation after its side effects ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Show the placeholder
    Checking,
    /// Show the route
    Render {
        /// Route being shown
        route: Route,
    },
    /// The location was replaced by the login view
    Redirect {
        /// Login path
        to: String,
        /// Path that was requested
        from: String,
    },
}

/// Applies [`decide`] to navigations and session changes
#[derive(Debug, Default)]
pub struct RouteGuard {
    location: Option<Route>,
    redirects: u64,
}

impl RouteGuard {
    /// A guard with no location yet
    #[must_use]
    pub const fn new() -> Self {
        Self {
            location: None,
            redirects: 0,
        }
    }

    /// Current location
    #[must_use]
    pub const fn location(&self) -> Option<&Route> {
        self.location.as_ref()
    }

    /// Redirects issued so far
    #[must_use]
    pub const fn redirects(&self) -> u64 {
        self.redirects
    }

    /// Navigate to `route` and carry out the decision
    pub fn navigate(
        &mut self,
        route: Route,
        session: &mut SessionStore,
        auth: &dyn AuthProvider,
    ) -> Outcome {
        session.pump();
        let decision = decide(&route, session.state());
        self.location = Some(route.clone());
        self.apply(route, decision, session, auth)
    }

    /// Re-evaluate the current location after the session changed
    ///
    /// Only restricted locations react: a pending check resolves to a render
    /// or a single redirect. A public location never forces a sign-out
    /// here, because sign-out is tied to entering the public view.
    pub fn reevaluate(&mut self, session: &mut SessionStore, auth: &dyn AuthProvider) -> Outcome {
        session.pump();
        let Some(route) = self.location.clone() else {
            return Outcome::Checking;
        };
        match decide(&route, session.state()) {
            Decision::SignOutThenRender => Outcome::Render { route },
            decision => self.apply(route, decision, session, auth),
        }
    }

    fn apply(
        &mut self,
        route: Route,
        decision: Decision,
        session: &mut SessionStore,
        auth: &dyn AuthProvider,
    ) -> Outcome {
        match decision {
            Decision::Placeholder => Outcome::Checking,
            Decision::Render => Outcome::Render { route },
            Decision::Redirect { from } => {
                self.location = Some(Route::Login);
                self.redirects += 1;
                log::debug!("redirecting {from} to {LOGIN_PATH}");
                Outcome::Redirect {
                    to: LOGIN_PATH.to_string(),
                    from,
                }
            },
            Decision::SignOutThenRender => {
                if let Err(e) = auth.sign_out() {
                    log::warn!("forced sign-out failed: {e}");
                }
                if session.wait_for(SIGN_OUT_TIMEOUT, |s| s.identity.is_none()) {
                    Outcome::Render { route }
                } else {
                    log::warn!("session still signed in after forced sign-out");
                    Outcome::Checking
                }
            },
        }
    }
}
