//! Bounded in-process memo of recent resolutions.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;
use tracing::trace;

/// Default number of entries kept per adapter.
pub const DEFAULT_MEMO_CAPACITY: usize = 1;

/// Small bounded cache sitting in front of the durable store.
///
/// With the default capacity of one it only remembers the most recent key,
/// and every put of a new key replaces it. Entries are swapped whole under
/// the lock, so concurrent readers never observe a partial value.
pub struct MemoCache<K, V> {
    entries: Mutex<LruCache<K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K: Hash + Eq, V: Clone> MemoCache<K, V> {
    /// Creates a memo holding at most `capacity` entries (minimum one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates a single-slot memo.
    #[must_use]
    pub fn single() -> Self {
        Self::new(DEFAULT_MEMO_CAPACITY)
    }

    /// Returns a clone of the cached value for `key`.
    pub fn get(&self, key: &K) -> Option<V> {
        let value = self.entries.lock().get(key).cloned();
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!("Memo hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!("Memo miss");
        }
        value
    }

    /// Stores a value, evicting the least recent entry when full.
    pub fn put(&self, key: K, value: V) {
        self.entries.lock().put(key, value);
    }

    /// Returns true if `key` is cached, without touching statistics.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.lock().contains(key)
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Returns hit/miss statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> MemoStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        MemoStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }
}

impl<K: Hash + Eq, V: Clone> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self::single()
    }
}

impl<K, V> std::fmt::Debug for MemoCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoCache")
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Statistics about memo performance.
#[derive(Debug, Clone)]
pub struct MemoStats {
    /// Number of memo hits.
    pub hits: u64,
    /// Number of memo misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of entries.
    pub size: usize,
}

impl std::fmt::Display for MemoStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Memo: {} entries, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}
