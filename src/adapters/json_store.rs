//! JSON file document store
//!
//! Each collection is one pretty-printed JSON array at
//! `<data_dir>/<collection>.json`, holding documents in insertion order.
//! Writes replace the file atomically and push the new snapshot to every
//! subscriber of that collection before the next write can start.
//!
//! With the `watch` feature, [`JsonFileStore::watch`] also re-reads files
//! changed by other processes (e.g. hand edits).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use super::subscribers::Subscribers;
use crate::core::models::{Document, DocumentId, Fields};
use crate::core::ports::{DocumentStore, SnapshotCallback, StoreError, Subscription};

/// [`DocumentStore`] over a directory of JSON files
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    dir: PathBuf,
    write_lock: Mutex<()>,
    subscribers: Mutex<HashMap<String, Subscribers<Vec<Document>>>>,
}

/// Reject names that could escape the data directory
fn check_collection(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::Rejected(format!("invalid collection name '{name}'")))
    }
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", dir.display())))?;
        log::debug!("document store at {}", dir.display());
        Ok(Self {
            inner: Arc::new(Inner {
                dir,
                write_lock: Mutex::new(()),
                subscribers: Mutex::new(HashMap::new()),
            }),
        })
    }

    /// Data directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.inner.dir
    }

    /// Path of a collection's file
    #[must_use]
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.inner.collection_path(collection)
    }

    fn modify<R>(
        &self,
        collection: &str,
        change: impl FnOnce(&mut Vec<Document>) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        check_collection(collection)?;
        // Publish under the lock so snapshots reach subscribers in write order
        let _guard = self.inner.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut documents = self.inner.read(collection)?;
        let result = change(&mut documents)?;
        self.inner.write(collection, &documents)?;
        self.inner.publish(collection, documents);
        Ok(result)
    }
}

impl Inner {
    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    fn read(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", path.display())))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", path.display())))
    }

    fn write(&self, collection: &str, documents: &[Document]) -> Result<(), StoreError> {
        let path = self.collection_path(collection);
        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(documents)
            .map_err(|e| StoreError::Rejected(e.to_string()))?;
        fs::write(&tmp, content)
            .and_then(|()| fs::rename(&tmp, &path))
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", path.display())))
    }

    fn subscribers(&self, collection: &str) -> Subscribers<Vec<Document>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(collection.to_string())
            .or_default()
            .clone()
    }

    fn publish(&self, collection: &str, documents: Vec<Document>) {
        let subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .cloned();
        if let Some(subscribers) = subscribers {
            subscribers.publish(documents);
        }
    }
}

impl DocumentStore for JsonFileStore {
    fn subscribe(&self, collection: &str, callback: SnapshotCallback) -> Subscription {
        if let Err(e) = check_collection(collection) {
            log::warn!("not subscribing: {e}");
            return Subscription::detached();
        }
        let subscribers = self.inner.subscribers(collection);
        let _guard = self.inner.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        match self.inner.read(collection) {
            Ok(documents) => subscribers.add_with_initial(callback, documents),
            Err(e) => {
                log::warn!("initial {collection} snapshot unavailable: {e}");
                subscribers.add(callback)
            },
        }
    }

    fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        check_collection(collection)?;
        let _guard = self.inner.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.inner.read(collection)
    }

    fn add(&self, collection: &str, fields: Fields) -> Result<DocumentId, StoreError> {
        let id = DocumentId::new(uuid::Uuid::new_v4().simple().to_string());
        self.modify(collection, |documents| {
            documents.push(Document::new(id.clone(), fields));
            Ok(())
        })?;
        Ok(id)
    }

    fn update(&self, collection: &str, id: &DocumentId, fields: Fields) -> Result<(), StoreError> {
        self.modify(collection, |documents| {
            let doc = documents
                .iter_mut()
                .find(|doc| &doc.id == id)
                .ok_or_else(|| StoreError::not_found(collection, id))?;
            *doc = Document::new(id.clone(), fields);
            Ok(())
        })
    }

    fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError> {
        self.modify(collection, |documents| {
            let before = documents.len();
            documents.retain(|doc| &doc.id != id);
            if documents.len() == before {
                log::debug!("delete of missing {collection}/{id}");
            }
            Ok(())
        })
    }
}

#[cfg(feature = "watch")]
mod watch {
    use notify::{EventKind, RecursiveMode, Watcher};

    use super::{Arc, Inner, JsonFileStore, PoisonError};

    /// Keeps a directory watcher alive; dropping it stops watching
    pub struct StoreWatcher {
        _watcher: notify::RecommendedWatcher,
    }

    impl std::fmt::Debug for StoreWatcher {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("StoreWatcher").finish_non_exhaustive()
        }
    }

    fn reload(inner: &Inner, path: &std::path::Path) {
        if path.extension().is_none_or(|ext| ext != "json") {
            return;
        }
        let Some(collection) = path.file_stem().and_then(|s| s.to_str()) else {
            return;
        };
        let _guard = inner.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        match inner.read(collection) {
            Ok(documents) => {
                log::debug!("{collection} changed on disk");
                inner.publish(collection, documents);
            },
            Err(e) => log::warn!("re-reading {collection} failed: {e}"),
        }
    }

    impl JsonFileStore {
        /// Push a fresh snapshot whenever a collection file changes on disk
        pub fn watch(&self) -> notify::Result<StoreWatcher> {
            let inner = Arc::clone(&self.inner);
            let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
                match res {
                    Ok(event) if matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) => {
                        for path in &event.paths {
                            reload(&inner, path);
                        }
                    },
                    Ok(_) => {},
                    Err(e) => log::warn!("watch error: {e}"),
                }
            })?;
            watcher.watch(&self.inner.dir, RecursiveMode::NonRecursive)?;
            log::info!("watching {}", self.inner.dir.display());
            Ok(StoreWatcher { _watcher: watcher })
        }
    }
}

#[cfg(feature = "watch")]
pub use watch::StoreWatcher;
