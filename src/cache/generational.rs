use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::Mutex;

use crate::stats::CacheStats;

/// Approximate-LRU cache with two generations and discrete switch events,
/// as opposed to a classical linked-list LRU: `active` and `background`
/// are plain hash maps, so lookups never mutate a pointer chain. When
/// `active` reaches `capacity` entries, `background` is discarded,
/// `active` is demoted to `background`, and a fresh empty `active` begins.
///
/// Readers may look up concurrently (a read borrows from `inner` under the
/// shared mutex only long enough to clone the value out); insert and the
/// generation switch take the same short exclusive lock.
pub struct GenerationalCache<K, V> {
    inner: Mutex<Generations<K, V>>,
    capacity: usize,
    stats: CacheStats,
}

struct Generations<K, V> {
    active: HashMap<K, V>,
    background: HashMap<K, V>,
}

impl<K, V> GenerationalCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        GenerationalCache {
            inner: Mutex::new(Generations { active: HashMap::new(), background: HashMap::new() }),
            capacity: capacity.max(1),
            stats: CacheStats::default(),
        }
    }

    /// Looks up `key`, calling `load` on a miss. `load`'s result is cached
    /// and returned. Mirrors the get-or-load shape used throughout the
    /// reader/index caches this type replaces, but with generation-switch
    /// eviction instead of per-entry recency bookkeeping.
    pub fn get_or_load<F>(&self, key: &K, load: F) -> crate::error::Result<V>
    where
        F: FnOnce() -> crate::error::Result<V>,
    {
        {
            let mut gens = self.inner.lock();
            if let Some(v) = gens.active.get(key) {
                self.stats.record_hit();
                return Ok(v.clone());
            }
            if let Some(v) = gens.background.remove(key) {
                gens.active.insert(key.clone(), v.clone());
                self.stats.record_hit();
                return Ok(v);
            }
        }

        self.stats.record_miss();
        let value = load()?;

        let mut gens = self.inner.lock();
        gens.active.insert(key.clone(), value.clone());
        if gens.active.len() >= self.capacity {
            gens.background = std::mem::take(&mut gens.active);
            self.stats.record_switch();
        }
        Ok(value)
    }

    pub fn stats(&self) -> crate::stats::CacheStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn clear(&self) {
        let mut gens = self.inner.lock();
        gens.active.clear();
        gens.background.clear();
    }
}
