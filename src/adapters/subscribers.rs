//! In-process subscriber fan-out shared by the adapters

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::ports::Subscription;

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    callbacks: BTreeMap<u64, Callback<T>>,
}

/// A set of callbacks that all receive each published value
///
/// Callbacks run on the publishing thread, outside the registry lock, in
/// the order they subscribed.
pub struct Subscribers<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for Subscribers<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                callbacks: BTreeMap::new(),
            })),
        }
    }
}

impl<T> std::fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers").field("len", &self.len()).finish()
    }
}

impl<T: Clone + 'static> Subscribers<T> {
    /// Register `callback`; dropping the returned handle removes it
    pub fn add(&self, callback: Box<dyn Fn(T) + Send + Sync>) -> Subscription {
        let id = {
            let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.callbacks.insert(id, Arc::from(callback));
            id
        };
        let weak = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry.lock().unwrap_or_else(PoisonError::into_inner).callbacks.remove(&id);
            }
        })
    }

    /// Deliver `initial` to `callback`, then register it
    pub fn add_with_initial(&self, callback: Box<dyn Fn(T) + Send + Sync>, initial: T) -> Subscription {
        callback(initial);
        self.add(callback)
    }

    /// Deliver `value` to every current subscriber
    pub fn publish(&self, value: T) {
        let callbacks: Vec<Callback<T>> = self
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .callbacks
            .values()
            .cloned()
            .collect();
        let Some((last, rest)) = callbacks.split_last() else {
            return;
        };
        for callback in rest {
            callback(value.clone());
        }
        last(value);
    }
}

impl<T> Subscribers<T> {
    /// Number of live subscriptions
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner).callbacks.len()
    }

    /// Whether nobody is subscribed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
