//! Document store port
//!
//! Defines the interface for a collection-oriented document database with
//! live queries.

use thiserror::Error;

use super::Subscription;
use crate::core::models::{Document, DocumentId, Fields};

/// Called with a full collection snapshot on subscribe and on every change
pub type SnapshotCallback = Box<dyn Fn(Vec<Document>) + Send + Sync>;

/// Errors from the document store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The target document does not exist (anymore)
    #[error("{collection}/{id} not found")]
    NotFound {
        /// Collection that was written to
        collection: String,
        /// Missing document id
        id: DocumentId,
    },

    /// The store refused the write
    #[error("write rejected: {0}")]
    Rejected(String),

    /// The store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Build a [`StoreError::NotFound`]
    #[must_use]
    pub fn not_found(collection: &str, id: &DocumentId) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.clone(),
        }
    }

    /// Whether the error means the target vanished
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Document store abstraction
///
/// Snapshots carry every document in the collection in the store's order.
/// No ordering is promised between snapshots.
pub trait DocumentStore: Send + Sync {
    /// Observe a collection until the returned handle is dropped
    fn subscribe(&self, collection: &str, callback: SnapshotCallback) -> Subscription;

    /// Read a collection once
    fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Add a document, returning its new id
    fn add(&self, collection: &str, fields: Fields) -> Result<DocumentId, StoreError>;

    /// Overwrite an existing document's fields
    ///
    /// Fails with [`StoreError::NotFound`] when `id` does not exist.
    fn update(&self, collection: &str, id: &DocumentId, fields: Fields) -> Result<(), StoreError>;

    /// Remove a document
    fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError>;
}
