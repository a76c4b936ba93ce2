//! Domain models for folio
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Project`], [`Skill`], [`EducationEntry`] - editable portfolio content
//! - [`ContentKind`] - what differs between content kinds
//! - [`Document`] - raw store documents
//! - [`Identity`] - an authenticated principal
//! - [`form`] - text transforms used by admin forms

mod content;
mod document;
mod education;
pub mod form;
mod identity;
mod project;
mod skill;

pub use content::{ContentKind, Entry};
pub use document::{Document, DocumentId, Fields};
pub use education::{EducationEntry, EducationForm, EducationKind};
pub use form::{FormError, join_lines, join_tags, parse_level, parse_lines, parse_tags};
pub use identity::{Credentials, Identity};
pub use project::{Project, ProjectForm};
pub use skill::{DEFAULT_LEVEL, Skill, SkillForm, SkillKind};
