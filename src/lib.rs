//! folio - a portfolio site with an authenticated admin console
//!
//! The library holds everything but the HTTP server loop and the CLI:
//! the session store, route guard, content repository and admin form
//! controller in [`core`], the local adapters for auth, storage and mail in
//! [`adapters`], the HTTP-agnostic [`api`] layer the server calls into, and
//! [`visitors`], which keeps one [`site::Site`] per browser.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
pub mod site;
pub mod visitors;
