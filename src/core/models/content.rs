//! The content kind abstraction
//!
//! Projects, skills and education entries are all edited the same way: a
//! text form is transformed into a typed value, which is encoded into
//! document fields. [`ContentKind`] captures what differs per kind.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::document::{DocumentId, Fields};
use super::form::FormError;

/// A kind of editable content stored in its own collection
pub trait ContentKind:
    Clone + PartialEq + std::fmt::Debug + Serialize + DeserializeOwned + Send + 'static
{
    /// Text form backing the admin editor
    type Form: Clone
        + Default
        + PartialEq
        + std::fmt::Debug
        + Serialize
        + DeserializeOwned
        + Send
        + 'static;

    /// Store collection holding this kind
    const COLLECTION: &'static str;

    /// Singular label for status messages ("project")
    const LABEL: &'static str;

    /// Partition labels in display order
    const CATEGORIES: &'static [&'static str];

    /// Which partition this item belongs to
    fn category(&self) -> &'static str;

    /// Populate a form for editing (inverse of [`ContentKind::from_form`])
    fn to_form(&self) -> Self::Form;

    /// Validate and transform a submitted form
    fn from_form(form: &Self::Form) -> Result<Self, FormError>;

    /// Check the fields every item must carry, stored or submitted
    ///
    /// Decoding and [`ContentKind::from_form`] both run this, so anything
    /// the repository loads can be submitted again unchanged.
    fn validate(&self) -> Result<(), FormError> {
        Ok(())
    }

    /// Canonicalize a decoded value
    ///
    /// Only fixes values that break a kind rule: optional fields that do
    /// not apply to the item's kind are dropped and out-of-range values are
    /// brought back in range.
    #[must_use]
    fn normalize(self) -> Self {
        self
    }

    /// Pin an edit draft to the kind of `original`
    ///
    /// Kinds are fixed at creation, so the draft is parsed as the stored
    /// kind whatever the operator selected.
    #[must_use]
    fn keep_kind(form: Self::Form, _original: &Self) -> Self::Form {
        form
    }

    /// Keep the stored shape of fields an edit left alone
    ///
    /// Sequences edited as text have more than one stored shape for the
    /// same text (`[]` and `[""]` both read as empty). When the text did not
    /// change, the stored sequence is kept as it was.
    #[must_use]
    fn carry_over(self, _original: &Self) -> Self {
        self
    }

    /// Encode into document fields
    fn to_fields(&self) -> Result<Fields, serde_json::Error> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(fields) => Ok(fields),
            other => Err(serde::ser::Error::custom(format!(
                "{} encoded to a non-object: {other}",
                Self::LABEL
            ))),
        }
    }

    /// Decode from document fields, normalizing the result
    ///
    /// Documents missing a required field do not decode.
    fn from_fields(fields: &Fields) -> Result<Self, serde_json::Error> {
        let value: Self = serde_json::from_value(serde_json::Value::Object(fields.clone()))?;
        let value = value.normalize();
        value
            .validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        Ok(value)
    }
}

/// A decoded item together with its document id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry<K> {
    /// Document identifier
    pub id: DocumentId,
    /// The decoded item
    #[serde(flatten)]
    pub item: K,
}

impl<K> Entry<K> {
    /// Pair an item with its id
    pub const fn new(id: DocumentId, item: K) -> Self {
        Self { id, item }
    }
}
