//! Mock implementations of port traits for testing
//!
//! These mocks provide configurable behavior for unit testing
//! without real I/O operations. Notifications are delivered synchronously
//! on the calling thread.

use std::collections::BTreeMap;
use std::sync::Mutex;

use folio::adapters::Subscribers;
use folio::core::models::{Credentials, Document, DocumentId, Fields, Identity};
use folio::core::ports::{
    AuthCallback, AuthError, AuthProvider, DeliveryError, DocumentStore, FormFields, Mailer,
    SnapshotCallback, StoreError, Subscription,
};

// =============================================================================
// AUTH
// =============================================================================

/// Mock implementation of AuthProvider
///
/// By default every subscriber gets the current identity immediately. A
/// deferred mock stays silent until [`MockAuth::announce`] is called, which
/// models a provider that has not resolved the session yet.
#[derive(Default)]
pub struct MockAuth {
    current: Mutex<Option<Identity>>,
    subscribers: Subscribers<Option<Identity>>,
    deferred: bool,
    sign_out_fails: bool,
}

impl MockAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(uid: &str) -> Self {
        let auth = Self::new();
        *auth.current.lock().unwrap() = Some(Identity::new(uid, None));
        auth
    }

    pub fn deferred() -> Self {
        Self {
            deferred: true,
            ..Self::default()
        }
    }

    pub fn failing_sign_out(mut self) -> Self {
        self.sign_out_fails = true;
        self
    }

    /// Notify subscribers of the current identity
    pub fn announce(&self) {
        let current = self.current.lock().unwrap().clone();
        self.subscribers.publish(current);
    }

    /// Change the identity and notify subscribers
    pub fn set(&self, identity: Option<Identity>) {
        *self.current.lock().unwrap() = identity.clone();
        self.subscribers.publish(identity);
    }

    pub fn current(&self) -> Option<Identity> {
        self.current.lock().unwrap().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl AuthProvider for MockAuth {
    fn subscribe(&self, callback: AuthCallback) -> Subscription {
        if self.deferred {
            self.subscribers.add(callback)
        } else {
            let current = self.current.lock().unwrap().clone();
            self.subscribers.add_with_initial(callback, current)
        }
    }

    fn sign_in(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        if credentials.password != "secret" {
            return Err(AuthError::InvalidCredentials);
        }
        let identity = Identity::new(format!("mock:{}", credentials.email), Some(credentials.email.clone()));
        self.set(Some(identity.clone()));
        Ok(identity)
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        if self.sign_out_fails {
            return Err(AuthError::Unavailable("offline".to_string()));
        }
        self.set(None);
        Ok(())
    }
}

// =============================================================================
// DOCUMENT STORE
// =============================================================================

/// Mock implementation of DocumentStore backed by in-memory vectors
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
    subscribers: Mutex<BTreeMap<String, Subscribers<Vec<Document>>>>,
    next_id: Mutex<u64>,
    reject_writes: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write fail with `Rejected(reason)`
    pub fn reject_writes(&self, reason: &str) {
        *self.reject_writes.lock().unwrap() = Some(reason.to_string());
    }

    /// Seed a document without notifying
    pub fn insert(&self, collection: &str, id: &str, fields: serde_json::Value) {
        let fields = fields.as_object().cloned().unwrap_or_default();
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(DocumentId::new(id), fields));
    }

    /// Remove a document behind everyone's back and notify
    pub fn remove_silently(&self, collection: &str, id: &str) {
        self.modify(collection, |docs| docs.retain(|d| d.id.as_str() != id));
    }

    /// Reorder a collection by id and notify
    pub fn reorder(&self, collection: &str, ids: &[&str]) {
        self.modify(collection, |docs| {
            let mut reordered = Vec::with_capacity(docs.len());
            for id in ids {
                if let Some(pos) = docs.iter().position(|d| d.id.as_str() == *id) {
                    reordered.push(docs.remove(pos));
                }
            }
            reordered.append(docs);
            *docs = reordered;
        });
    }

    /// Re-send the current contents to subscribers
    pub fn notify(&self, collection: &str) {
        self.modify(collection, |_| {});
    }

    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections.lock().unwrap().get(collection).cloned().unwrap_or_default()
    }

    pub fn fields(&self, collection: &str, id: &DocumentId) -> Option<Fields> {
        self.documents(collection).into_iter().find(|d| &d.id == id).map(|d| d.fields)
    }

    pub fn subscriber_count(&self, collection: &str) -> usize {
        self.subscribers.lock().unwrap().get(collection).map_or(0, Subscribers::len)
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        match self.reject_writes.lock().unwrap().as_ref() {
            Some(reason) => Err(StoreError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }

    fn modify<T>(&self, collection: &str, change: impl FnOnce(&mut Vec<Document>) -> T) -> T {
        let (result, snapshot) = {
            let mut collections = self.collections.lock().unwrap();
            let docs = collections.entry(collection.to_string()).or_default();
            let result = change(docs);
            (result, docs.clone())
        };
        let subscribers = self.subscribers.lock().unwrap().get(collection).cloned();
        if let Some(subscribers) = subscribers {
            subscribers.publish(snapshot);
        }
        result
    }
}

impl DocumentStore for MemoryStore {
    fn subscribe(&self, collection: &str, callback: SnapshotCallback) -> Subscription {
        let subscribers = self
            .subscribers
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .clone();
        subscribers.add_with_initial(callback, self.documents(collection))
    }

    fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self.documents(collection))
    }

    fn add(&self, collection: &str, fields: Fields) -> Result<DocumentId, StoreError> {
        self.check_writable()?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            DocumentId::new(format!("doc-{next}"))
        };
        let doc = Document::new(id.clone(), fields);
        self.modify(collection, |docs| docs.push(doc));
        Ok(id)
    }

    fn update(&self, collection: &str, id: &DocumentId, fields: Fields) -> Result<(), StoreError> {
        self.check_writable()?;
        let found = self.modify(collection, |docs| match docs.iter_mut().find(|d| &d.id == id) {
            Some(doc) => {
                *doc = Document::new(id.clone(), fields);
                true
            },
            None => false,
        });
        if found {
            Ok(())
        } else {
            Err(StoreError::not_found(collection, id))
        }
    }

    fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError> {
        self.check_writable()?;
        self.modify(collection, |docs| docs.retain(|d| &d.id != id));
        Ok(())
    }
}

// =============================================================================
// MAILER
// =============================================================================

/// A recorded mail submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentForm {
    pub service_id: String,
    pub template_id: String,
    pub fields: FormFields,
    pub api_key: String,
}

/// Mock implementation of Mailer
#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<SentForm>>,
    fail: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentForm> {
        self.sent.lock().unwrap().clone()
    }
}

impl Mailer for MockMailer {
    fn send_form(
        &self,
        service_id: &str,
        template_id: &str,
        fields: &FormFields,
        api_key: &str,
    ) -> Result<String, DeliveryError> {
        if self.fail {
            return Err(DeliveryError("503 Service Unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(SentForm {
            service_id: service_id.to_string(),
            template_id: template_id.to_string(),
            fields: fields.clone(),
            api_key: api_key.to_string(),
        });
        Ok("OK".to_string())
    }
}
