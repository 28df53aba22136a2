use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

/// Shared expiry window for every cache in the service.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

const MAX_CACHE_ENTRIES: usize = 512;

/// Time source seam. Production uses the wall clock; tests inject a manual
/// clock so expiry can be tested without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A steppable clock for deterministic expiry tests.
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, d: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += d;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    inserted_at: Instant,
}

/// Bounded key/value store with wall-clock expiry. Stale entries read as
/// absent and are removed on the next lookup; inserts at the bound evict
/// whatever has already expired.
pub struct TtlCache<T> {
    entries: RwLock<HashMap<String, Entry<T>>>,
    ttl: Duration,
    max_entries: usize,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_entries: MAX_CACHE_ENTRIES,
            clock,
        }
    }

    pub async fn get(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        {
            let entries = self.entries.read().await;
            let entry = entries.get(key)?;
            if now.duration_since(entry.inserted_at) < self.ttl {
                return Some(entry.value.clone());
            }
        }
        // Stale: drop it so the map does not accumulate dead entries.
        self.entries.write().await.remove(key);
        debug!(key, "Removed expired cache entry");
        None
    }

    pub async fn insert(&self, key: impl Into<String>, value: T) {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        // Opportunistic eviction when we hit the limit
        if entries.len() >= self.max_entries {
            let before = entries.len();
            entries.retain(|_, v| now.duration_since(v.inserted_at) < self.ttl);
            debug!(evicted = before - entries.len(), "Cache at capacity, dropped expired entries");
        }
        entries.insert(
            key.into(),
            Entry {
                value,
                inserted_at: now,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_fresh_value() {
        let cache: TtlCache<String> = TtlCache::new(DEFAULT_TTL);
        cache.insert("k", "v".to_string()).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache: TtlCache<u32> = TtlCache::new(DEFAULT_TTL);
        assert_eq!(cache.get("absent").await, None);
    }

    #[tokio::test]
    async fn test_expiry_boundary() {
        let clock = Arc::new(ManualClock::new());
        let cache: TtlCache<u32> = TtlCache::with_clock(DEFAULT_TTL, clock.clone());
        cache.insert("k", 1).await;

        clock.advance(DEFAULT_TTL - Duration::from_millis(1));
        assert_eq!(cache.get("k").await, Some(1), "hit just inside the window");

        clock.advance(Duration::from_millis(2));
        assert_eq!(cache.get("k").await, None, "miss just past the window");
    }

    #[tokio::test]
    async fn test_stale_entry_removed_on_lookup() {
        let clock = Arc::new(ManualClock::new());
        let cache: TtlCache<u32> = TtlCache::with_clock(DEFAULT_TTL, clock.clone());
        cache.insert("k", 1).await;
        clock.advance(DEFAULT_TTL + Duration::from_secs(1));

        assert_eq!(cache.get("k").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_insert_overwrites_and_refreshes() {
        let clock = Arc::new(ManualClock::new());
        let cache: TtlCache<u32> = TtlCache::with_clock(DEFAULT_TTL, clock.clone());
        cache.insert("k", 1).await;
        clock.advance(Duration::from_secs(200));
        cache.insert("k", 2).await;
        clock.advance(Duration::from_secs(200));

        // 400s since the first insert but only 200s since the refresh.
        assert_eq!(cache.get("k").await, Some(2));
    }

    #[tokio::test]
    async fn test_eviction_at_capacity_drops_expired() {
        let clock = Arc::new(ManualClock::new());
        let mut cache: TtlCache<u32> = TtlCache::with_clock(DEFAULT_TTL, clock.clone());
        cache.max_entries = 4;

        for i in 0..4 {
            cache.insert(format!("old{i}"), i).await;
        }
        clock.advance(DEFAULT_TTL + Duration::from_secs(1));
        cache.insert("new", 99).await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("new").await, Some(99));
    }
}
