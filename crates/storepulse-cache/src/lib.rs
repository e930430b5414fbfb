//! Keyed TTL cache for externally-fetched review batches and derived
//! analysis results.
//!
//! One instance per cache domain (reviews, qualitative, sentiment). Each
//! domain holds at most 10 entries; writing past the bound evicts the
//! oldest-by-timestamp entries. Writes are last-writer-wins: two requests
//! that both miss simply recompute and the second overwrite is harmless.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

pub const DEFAULT_MAX_ENTRIES: usize = 10;
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Time source, swappable in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock-backed default.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry<T> {
    payload: T,
    inserted_at: Instant,
}

struct CacheInner<T> {
    entries: HashMap<String, CacheEntry<T>>,
    max_entries: usize,
    ttl: Duration,
}

/// Thread-safe bounded TTL cache.
pub struct TtlCache<T> {
    inner: Mutex<CacheInner<T>>,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(max_entries: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(max_entries + 1),
                max_entries,
                ttl,
            }),
            clock,
        }
    }

    /// Create a cache with the default bound (10 entries, 1 hr TTL).
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, ttl, Arc::new(SystemClock))
    }

    /// Get a cached payload. Returns None on miss or expired entry; expired
    /// entries are removed on the way out.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut inner = self.inner.lock();
        let now = self.clock.now();

        match inner.entries.get(key) {
            Some(entry) if now.duration_since(entry.inserted_at) < inner.ttl => {
                Some(entry.payload.clone())
            }
            Some(_) => {
                inner.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert a payload, replacing (not merging) any previous entry for the
    /// key. Eviction of oldest entries runs after the insertion.
    pub fn insert(&self, key: impl Into<String>, payload: T) {
        let mut inner = self.inner.lock();
        let now = self.clock.now();

        inner.entries.insert(
            key.into(),
            CacheEntry {
                payload,
                inserted_at: now,
            },
        );

        while inner.entries.len() > inner.max_entries {
            let oldest = inner
                .entries
                .iter()
                .min_by_key(|(_, e)| e.inserted_at)
                .map(|(k, _)| k.clone());
            match oldest {
                Some(key) => {
                    inner.entries.remove(&key);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }
}
