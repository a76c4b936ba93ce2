//! Adapter implementations for port traits
//!
//! This module contains the concrete implementations that do I/O:
//!
//! - `local_auth` - single admin account with an argon2 password hash
//! - `json_store` - one JSON file per collection, with live snapshots
//! - `mailer` - outbox file and (feature `mailer`) HTTP delivery
//! - `subscribers` - callback fan-out shared by the above

mod json_store;
mod local_auth;
mod mailer;
mod subscribers;

#[cfg(feature = "watch")]
pub use json_store::StoreWatcher;
pub use json_store::JsonFileStore;
pub use local_auth::{AdminAccount, LocalAuthProvider, hash_password};
#[cfg(feature = "mailer")]
pub use mailer::HttpMailer;
pub use mailer::{OutboxMailer, OutboxRecord};
pub use subscribers::Subscribers;
