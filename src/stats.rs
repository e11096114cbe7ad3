use std::sync::atomic::{AtomicU64, Ordering};

/// Introspection counters for a `ReaderPool`.
#[derive(Debug, Default)]
pub struct PoolStats {
    pub readers_created: AtomicU64,
    pub readers_queued: AtomicU64,
}

impl PoolStats {
    pub fn snapshot(&self) -> PoolStatsSnapshot {
        PoolStatsSnapshot {
            readers_created: self.readers_created.load(Ordering::Relaxed),
            readers_queued: self.readers_queued.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PoolStatsSnapshot {
    pub readers_created: u64,
    pub readers_queued: u64,
}

/// Introspection counters shared by the two-generation entity cache and the
/// per-User-Agent result cache.
#[derive(Debug, Default)]
pub struct CacheStats {
    pub requests: AtomicU64,
    pub misses: AtomicU64,
    pub switches: AtomicU64,
}

impl CacheStats {
    pub fn record_hit(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_switch(&self) {
        self.switches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            switches: self.switches.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CacheStatsSnapshot {
    pub requests: u64,
    pub misses: u64,
    pub switches: u64,
}

impl CacheStatsSnapshot {
    pub fn hit_rate(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            (self.requests - self.misses) as f64 / self.requests as f64
        }
    }
}
