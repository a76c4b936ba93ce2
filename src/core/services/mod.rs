//! Business logic services
//!
//! Orchestration over domain models and port traits. Services never touch
//! files or the network themselves; everything external goes through a
//! port.
//!
//! - [`session`] - mirror of the auth provider's identity
//! - [`guard`] - access decisions for navigations
//! - [`repository`] - typed reads and writes per content collection
//! - [`form`] - admin editing state machine
//! - [`contact`] - contact form delivery
//! - [`dashboard`] - admin content counts

pub mod contact;
pub mod dashboard;
mod feed;
pub mod form;
pub mod guard;
pub mod repository;
pub mod session;

pub use contact::{ContactMessage, ContactService, ContactSettings, Delivery};
pub use dashboard::ContentStats;
pub use feed::Feed;
pub use form::{FormController, FormState, PendingWrite, SubmitOutcome, Target};
pub use guard::{
    Access, AdminView, Decision, LOGIN_PATH, Outcome, Route, RouteGuard, SIGN_OUT_TIMEOUT, decide,
};
pub use repository::{ContentRepository, LiveCollection, Partition, Snapshot, Snapshots};
pub use session::{SessionState, SessionStore};
