//! Core domain logic for folio
//!
//! Pure logic with no I/O of its own. The auth provider, the document
//! store and the mail service are reached through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Project, Skill, EducationEntry, Identity)
//! - `services/` - Session, guard, repositories and form controllers
//! - `ports/` - Trait definitions for external collaborators

pub mod models;
pub mod ports;
pub mod services;
