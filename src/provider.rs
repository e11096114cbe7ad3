use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::{Mutex, RwLock};

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::io::Source;
use crate::matcher::{MatchResult, SignatureMatcher};
use crate::stats::{CacheStatsSnapshot, PoolStatsSnapshot};
use crate::watcher::Watcher;

/// Header name carrying an explicit profile override: a comma-separated
/// list of `Profile::profile_id` values, one per component the caller wants
/// to force rather than let §4.G's matching pipeline choose (§4.I
/// "profile-override logic"). Absent from an ordinary `match_headers` call.
pub const PROFILE_OVERRIDE_HEADER: &str = "X-Device-Profile-Overrides";

/// Top-level entry point (§4.I): owns the current dataset behind a
/// swappable lock, a classical per-User-Agent LRU result cache (distinct
/// from the entity-level `GenerationalCache` each storage list keeps), and
/// an optional background watcher that reloads the data file in place.
pub struct Provider {
    dataset: Arc<RwLock<Arc<Dataset>>>,
    config: Config,
    result_cache: Mutex<LruCache<Vec<u8>, MatchResult>>,
    cache_stats: crate::stats::CacheStats,
    watcher: Option<Watcher>,
}

impl Provider {
    pub fn open(source: Source, config: Config) -> Result<Arc<Provider>> {
        let dataset = Dataset::open(source, &config)?;
        let dataset = Arc::new(RwLock::new(dataset));
        let cap = NonZeroUsize::new(config.result_cache_size.max(1)).unwrap();
        let result_cache = Mutex::new(LruCache::new(cap));

        let watcher = if config.auto_update {
            config.binary_file_path.as_ref().map(|path| Watcher::spawn(path.clone(), dataset.clone(), config.clone()))
        } else {
            None
        };

        Ok(Arc::new(Provider {
            dataset,
            config,
            result_cache,
            cache_stats: crate::stats::CacheStats::default(),
            watcher,
        }))
    }

    pub fn current_dataset(&self) -> Arc<Dataset> {
        self.dataset.read().clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Matches a raw User-Agent byte string, consulting the result cache
    /// first. A cache hit still reflects whichever dataset produced it —
    /// it is not invalidated just because the background watcher has since
    /// swapped in a newer one, matching the "last known good" read
    /// semantics a concurrent snapshot swap implies.
    pub fn match_user_agent(&self, ua: &[u8]) -> Result<MatchResult> {
        if let Some(hit) = self.result_cache.lock().get(&ua.to_vec()).cloned() {
            self.cache_stats.record_hit();
            return Ok(hit);
        }
        self.cache_stats.record_miss();

        let dataset = self.current_dataset();
        let matcher = SignatureMatcher::new(dataset, self.config.node_evaluation_budget);
        let result = matcher.match_user_agent(ua)?;

        self.result_cache.lock().put(ua.to_vec(), result.clone());
        Ok(result)
    }

    /// Matches from a header map, trying `Config::override_user_agent_headers`
    /// in order and falling back to an empty User-Agent (which resolves to
    /// `Strategy::None`) if none of them are present. Then, only if the
    /// caller's map carries `PROFILE_OVERRIDE_HEADER`, forces the named
    /// profile ids onto the result in place of whatever the UA match chose
    /// for their component (§4.I "profile-override logic").
    pub fn match_headers(&self, headers: &HashMap<String, String>) -> Result<MatchResult> {
        let mut result = None;
        for name in &self.config.override_user_agent_headers {
            if let Some(value) = headers.get(name) {
                result = Some(self.match_user_agent(value.as_bytes())?);
                break;
            }
        }
        let result = match result {
            Some(result) => result,
            None => self.match_user_agent(&[])?,
        };

        match headers.get(PROFILE_OVERRIDE_HEADER) {
            Some(raw) => self.apply_profile_overrides(result, raw),
            None => Ok(result),
        }
    }

    /// Replaces, per component, whichever profile the base match chose with
    /// the caller's explicit override, for every comma-separated
    /// `Profile::profile_id` in `raw` that resolves against the current
    /// dataset. Unknown or malformed ids are skipped rather than failing the
    /// whole match — an override map is a best-effort refinement, not a
    /// precondition for a match to succeed.
    fn apply_profile_overrides(&self, mut result: MatchResult, raw: &str) -> Result<MatchResult> {
        let dataset = result.dataset.clone();
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let Ok(profile_id) = token.parse::<u32>() else {
                continue;
            };
            if let Some(profile) = dataset.profile_by_id(profile_id)? {
                result.profiles.retain(|p| p.component_id != profile.component_id);
                result.profiles.push(profile);
            }
        }
        Ok(result)
    }

    pub fn result_cache_stats(&self) -> CacheStatsSnapshot {
        self.cache_stats.snapshot()
    }

    pub fn pool_stats(&self) -> PoolStatsSnapshot {
        self.current_dataset().pool().stats()
    }

    pub fn property_by_name(&self, name: &str) -> Option<(u32, String)> {
        self.current_dataset().property_by_name(name)
    }
}
