//! De-duplication of concurrent loads that share a key.
//!
//! Screens that mount together often ask for the same product list at the
//! same moment. [`InflightCache`] lets the first caller start the load and
//! every concurrent caller with the same key await that same future. The
//! entry is removed as soon as the load resolves, so the cache never serves
//! stale data: it only collapses requests that overlap in time.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};

type Pending<V> = Shared<BoxFuture<'static, V>>;

/// Shares one pending load per key among concurrent callers.
///
/// `V` must be `Clone` because every waiter receives its own copy; wrap
/// large payloads or errors in `Arc`.
pub struct InflightCache<K, V>
where
    V: Clone,
{
    pending: Mutex<HashMap<K, Pending<V>>>,
}

impl<K, V> InflightCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the result of the load for `key`, starting it with `loader`
    /// only if no load for `key` is already in flight.
    pub async fn get_or_load<F, Fut>(&self, key: K, loader: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V> + Send + 'static,
    {
        let shared = {
            let mut pending = self.lock();
            if let Some(existing) = pending.get(&key) {
                tracing::debug!(in_flight = pending.len(), "joining in-flight load");
                existing.clone()
            } else {
                let fresh = loader().boxed().shared();
                pending.insert(key.clone(), fresh.clone());
                fresh
            }
        };

        let value = shared.clone().await;

        // Clear on resolve. A newer load may already occupy the slot, so only
        // remove the entry this call was waiting on.
        let mut pending = self.lock();
        if pending
            .get(&key)
            .is_some_and(|current| current.ptr_eq(&shared))
        {
            pending.remove(&key);
        }

        value
    }

    /// Number of loads currently in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forgets every in-flight entry. Callers already awaiting keep their
    /// futures; new callers start fresh loads.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Pending<V>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> Default for InflightCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
