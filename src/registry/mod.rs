//! In-memory subscription registry.
//!
//! Holds the set of push endpoints eligible for fan-out. Keyed by endpoint,
//! last write wins. Not persisted: the registry is empty after every process
//! restart, which is the accepted contract for this service.

use std::sync::Mutex;

use chrono::Utc;

use crate::models::{PushSubscription, SubscriptionKeys};

/// Registry of push subscriptions, shared across handlers behind an `Arc`.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    inner: Mutex<Vec<PushSubscription>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscription, stamping the registration time.
    ///
    /// A subscription whose endpoint is already present is overwritten in
    /// place, keeping its position in the list.
    pub fn add(&self, endpoint: String, keys: SubscriptionKeys) {
        let subscription = PushSubscription {
            endpoint,
            keys,
            subscribed_at: Utc::now().to_rfc3339(),
        };

        let mut subs = self.inner.lock().expect("registry lock poisoned");
        match subs.iter_mut().find(|s| s.endpoint == subscription.endpoint) {
            Some(existing) => *existing = subscription,
            None => subs.push(subscription),
        }
    }

    /// Remove the subscription with the given endpoint, if present.
    pub fn remove(&self, endpoint: &str) {
        let mut subs = self.inner.lock().expect("registry lock poisoned");
        subs.retain(|s| s.endpoint != endpoint);
    }

    /// Snapshot copy of all current subscriptions, in insertion order.
    pub fn list(&self) -> Vec<PushSubscription> {
        self.inner.lock().expect("registry lock poisoned").clone()
    }

    /// Number of distinct endpoints currently registered.
    pub fn count(&self) -> usize {
        self.inner.lock().expect("registry lock poisoned").len()
    }
}
