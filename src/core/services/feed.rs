//! Channel-backed notification feeds
//!
//! Ports deliver notifications through callbacks that may run on any
//! thread. A [`Feed`] turns such a callback subscription into a queue that
//! the owning loop drains at its own pace, so state is only ever replaced
//! on the thread that reads it.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::core::ports::Subscription;

/// A queue of notifications from one live subscription
///
/// Dropping the feed drops the underlying [`Subscription`].
#[derive(Debug)]
pub struct Feed<T> {
    rx: Receiver<T>,
    _subscription: Subscription,
}

impl<T: Send + 'static> Feed<T> {
    /// Open a feed by handing `subscribe` a callback that enqueues
    pub fn open<F>(subscribe: F) -> Self
    where
        F: FnOnce(Box<dyn Fn(T) + Send + Sync>) -> Subscription,
    {
        let (tx, rx) = mpsc::channel();
        let subscription = subscribe(Box::new(move |value| {
            // The receiver is gone only after the feed was dropped
            let _ = tx.send(value);
        }));
        Self {
            rx,
            _subscription: subscription,
        }
    }
}

impl<T> Feed<T> {
    /// Take every queued notification, oldest first, without blocking
    pub fn drain(&self) -> Vec<T> {
        self.rx.try_iter().collect()
    }

    /// Take the most recent queued notification, discarding older ones
    pub fn drain_latest(&self) -> Option<T> {
        self.rx.try_iter().last()
    }

    /// Wait up to `timeout` for the next notification
    pub fn next_timeout(&self, timeout: Duration) -> Option<T> {
        match self.rx.recv_timeout(timeout) {
            Ok(value) => Some(value),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl<T> Iterator for Feed<T> {
    type Item = T;

    /// Block until the next notification; ends when the source hangs up
    fn next(&mut self) -> Option<T> {
        self.rx.recv().ok()
    }
}
