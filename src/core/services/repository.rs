//! Content repository
//!
//! One repository per content kind. It decodes store snapshots into typed
//! entries and encodes writes into document fields. [`LiveCollection`] keeps
//! the in-memory mirror that views read from.
//!
//! The mirror is only ever replaced wholesale by the latest snapshot. Writes
//! never touch it; the snapshot that follows a write is the only
//! confirmation a view gets.

use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;

use super::feed::Feed;
use crate::core::models::{ContentKind, Document, DocumentId, Entry};
use crate::core::ports::{DocumentStore, StoreError};

/// A decoded, point-in-time view of one collection
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<K> {
    entries: Vec<Entry<K>>,
}

impl<K> Default for Snapshot<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: ContentKind> Snapshot<K> {
    /// Decode store documents, keeping the store's order
    ///
    /// Undecodable documents are skipped with a warning. A repeated id keeps
    /// its first occurrence.
    #[must_use]
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(documents.len());
        for doc in documents {
            if !seen.insert(doc.id.clone()) {
                log::warn!("duplicate {} id {} in snapshot", K::LABEL, doc.id);
                continue;
            }
            match K::from_fields(&doc.fields) {
                Ok(item) => entries.push(Entry::new(doc.id, item)),
                Err(e) => log::warn!("skipping {} {}: {e}", K::LABEL, doc.id),
            }
        }
        Self { entries }
    }

    /// Entries in store order
    #[must_use]
    pub fn entries(&self) -> &[Entry<K>] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id
    #[must_use]
    pub fn get(&self, id: &DocumentId) -> Option<&Entry<K>> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Entries grouped by kind, in [`ContentKind::CATEGORIES`] order
    ///
    /// Every category is present, empty or not.
    #[must_use]
    pub fn partition(&self) -> Vec<Partition<'_, K>> {
        K::CATEGORIES
            .iter()
            .map(|&category| Partition {
                category,
                entries: self.entries.iter().filter(|e| e.item.category() == category).collect(),
            })
            .collect()
    }

    /// Entries of one category
    #[must_use]
    pub fn category(&self, category: &str) -> Vec<&Entry<K>> {
        self.entries.iter().filter(|e| e.item.category() == category).collect()
    }
}

/// One kind's share of a snapshot
#[derive(Debug, Serialize)]
pub struct Partition<'a, K> {
    /// Category label
    pub category: &'static str,
    /// Entries in store order
    pub entries: Vec<&'a Entry<K>>,
}

/// Write-through access to one content collection
pub struct ContentRepository<K> {
    store: Arc<dyn DocumentStore>,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Clone for ContentRepository<K> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _kind: PhantomData,
        }
    }
}

impl<K> std::fmt::Debug for ContentRepository<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRepository").finish_non_exhaustive()
    }
}

impl<K: ContentKind> ContentRepository<K> {
    /// Create a repository over `store`
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _kind: PhantomData,
        }
    }

    /// Start a fresh live subscription
    ///
    /// The first snapshot is the collection as it is now; every later one
    /// follows a change. Subscribing again starts over with a full snapshot.
    #[must_use]
    pub fn subscribe(&self) -> Snapshots<K> {
        let feed = Feed::open(|callback| self.store.subscribe(K::COLLECTION, callback));
        Snapshots {
            feed,
            _kind: PhantomData,
        }
    }

    /// Read the collection once
    pub fn fetch(&self) -> Result<Snapshot<K>, StoreError> {
        Ok(Snapshot::from_documents(self.store.list(K::COLLECTION)?))
    }

    /// Write a new document and return its id once acknowledged
    pub fn create(&self, item: &K) -> Result<DocumentId, StoreError> {
        let fields = item.to_fields().map_err(|e| StoreError::Rejected(e.to_string()))?;
        let id = self.store.add(K::COLLECTION, fields)?;
        log::info!("created {} {id}", K::LABEL);
        Ok(id)
    }

    /// Overwrite an existing document
    pub fn update(&self, id: &DocumentId, item: &K) -> Result<(), StoreError> {
        let fields = item.to_fields().map_err(|e| StoreError::Rejected(e.to_string()))?;
        self.store.update(K::COLLECTION, id, fields)?;
        log::info!("updated {} {id}", K::LABEL);
        Ok(())
    }

    /// Remove a document
    ///
    /// Confirmation is the caller's job. A missing id is left to the store.
    pub fn delete(&self, id: &DocumentId) -> Result<(), StoreError> {
        self.store.delete(K::COLLECTION, id)?;
        log::info!("deleted {} {id}", K::LABEL);
        Ok(())
    }
}

/// Lazy, unbounded sequence of snapshots from one subscription
///
/// Iterating blocks for the next snapshot. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Snapshots<K> {
    feed: Feed<Vec<Document>>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ContentKind> Snapshots<K> {
    /// The most recent queued snapshot, if any arrived since last asked
    pub fn drain_latest(&self) -> Option<Snapshot<K>> {
        self.feed.drain_latest().map(Snapshot::from_documents)
    }

    /// Wait up to `timeout` for the next snapshot
    pub fn next_timeout(&self, timeout: std::time::Duration) -> Option<Snapshot<K>> {
        self.feed.next_timeout(timeout).map(Snapshot::from_documents)
    }
}

impl<K: ContentKind> Iterator for Snapshots<K> {
    type Item = Snapshot<K>;

    fn next(&mut self) -> Option<Snapshot<K>> {
        self.feed.next().map(Snapshot::from_documents)
    }
}

/// The in-memory mirror of one collection
#[derive(Debug)]
pub struct LiveCollection<K> {
    snapshots: Snapshots<K>,
    current: Snapshot<K>,
    loaded: bool,
}

impl<K: ContentKind> LiveCollection<K> {
    /// Subscribe through `repo` and start empty
    #[must_use]
    pub fn open(repo: &ContentRepository<K>) -> Self {
        Self {
            snapshots: repo.subscribe(),
            current: Snapshot::default(),
            loaded: false,
        }
    }

    /// Replace the mirror with the latest queued snapshot
    ///
    /// Returns whether a snapshot was applied.
    pub fn refresh(&mut self) -> bool {
        match self.snapshots.drain_latest() {
            Some(snapshot) => {
                self.current = snapshot;
                self.loaded = true;
                true
            },
            None => false,
        }
    }

    /// Drop the current subscription and start a new one
    pub fn resubscribe(&mut self, repo: &ContentRepository<K>) {
        self.snapshots = repo.subscribe();
        self.loaded = false;
        self.refresh();
    }

    /// The mirror as of the last refresh
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot<K> {
        &self.current
    }

    /// Whether any snapshot has arrived yet
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }
}
