//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and the managed services it relies on (auth, documents, email).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core domain logic depends only on these traits, never on concrete
//! implementations. Tests drive the core through in-memory mocks.

mod auth;
mod document_store;
mod mailer;
mod subscription;

pub use auth::{AuthCallback, AuthError, AuthProvider};
pub use document_store::{DocumentStore, SnapshotCallback, StoreError};
pub use mailer::{DeliveryError, FormFields, Mailer};
pub use subscription::Subscription;
