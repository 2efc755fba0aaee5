// Time-boxed cache of raw dashboard definitions
use crate::application::clock::Clock;
use crate::domain::dashboard::DashboardDefinition;
use crate::domain::route::CacheKey;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_DEFINITION_TTL: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, stored_at: Instant) -> Self {
        Self { value, stored_at }
    }

    /// Usable while `now - stored_at <= ttl`
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) <= ttl
    }
}

/// Expiry is checked on read; stale entries stay in the map until
/// overwritten, removed or cleared.
pub struct DefinitionCache {
    entries: DashMap<CacheKey, CacheEntry<Arc<DashboardDefinition>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl DefinitionCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<DashboardDefinition>> {
        let entry = self.entries.get(key)?;
        if entry.is_fresh(self.clock.now(), self.ttl) {
            Some(entry.value.clone())
        } else {
            tracing::debug!("Definition cache entry for {} expired", key);
            None
        }
    }

    pub fn set(&self, key: CacheKey, definition: Arc<DashboardDefinition>) {
        let entry = CacheEntry::new(definition, self.clock.now());
        self.entries.insert(key, entry);
    }

    pub fn remove(&self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
