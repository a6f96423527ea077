//! A small TTL cache for read-mostly lookup data.
//!
//! Entries expire after a fixed time-to-live and are evicted lazily on
//! access. The cache can also be flushed or purged explicitly.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// A thread-safe map whose entries expire after a fixed TTL.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a value if present and not expired. Expired entries are
    /// removed on the way out.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert or replace a value, resetting its TTL.
    pub fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key,
            Entry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drop every entry.
    pub fn flush(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
    }

    /// Remove all expired entries and return how many live ones remain.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        let now = Instant::now();
        entries.retain(|_, e| e.expires_at > now);
        entries.len()
    }
}
