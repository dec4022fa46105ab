//! In-memory cache with per-entry time-to-live.
//!
//! Entries are visible until their expiry instant passes, after which they are
//! logically absent. Expired entries encountered on read are removed on the
//! spot, so steady read traffic keeps the map bounded even without the
//! periodic sweep. Capacity is unbounded: the key space is quotes and
//! fundamentals per held security, which the portfolio size bounds.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// String-keyed store whose entries expire a fixed duration after insertion.
///
/// All methods take `&self`; a single mutex guards the underlying map. The
/// time base is [`tokio::time::Instant`], so tests running under a paused
/// runtime clock control expiry deterministically.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, expiring `ttl` from now. Overwrites any
    /// existing entry unconditionally.
    pub fn set(&self, key: &str, value: V, ttl: Duration) {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.lock().insert(key.to_string(), entry);
    }

    /// Return the value under `key` if present and unexpired. An expired
    /// entry found here is deleted before returning `None`.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if Instant::now() <= entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Freshness check with the same eviction side effect as [`get`](Self::get).
    pub fn contains(&self, key: &str) -> bool {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if Instant::now() <= entry.expires_at => true,
            Some(_) => {
                entries.remove(key);
                false
            }
            None => false,
        }
    }

    pub fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Current entry count, including expired entries not yet swept. Call
    /// [`cleanup`](Self::cleanup) first for a live count.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Evict every expired entry eagerly and return how many were removed.
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| now <= entry.expires_at);
        before - entries.len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
