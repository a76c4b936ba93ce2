//! Store documents
//!
//! A document is what the document store hands back: an opaque identifier
//! plus a bag of JSON fields. Typed content is decoded from the fields by
//! [`ContentKind`](super::ContentKind).

use serde::{Deserialize, Serialize};

/// Raw document fields as stored
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Opaque document identifier, assigned by the store at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wrap an identifier issued by a store
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A document as delivered by the store: `{ id, ...fields }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned identifier
    pub id: DocumentId,
    /// Everything else
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    /// Create a document from an id and its fields
    ///
    /// A stray `id` key inside `fields` is dropped; the identifier lives
    /// outside the field bag.
    #[must_use]
    pub fn new(id: DocumentId, mut fields: Fields) -> Self {
        fields.remove("id");
        Self { id, fields }
    }
}
