use std::path::PathBuf;
use std::time::Duration;

/// Engine-wide configuration. None of these options are mandatory; every
/// field has a default matching the bracketed values in the external
/// interface description. Unknown keys arriving from a higher-level config
/// layer (out of scope here) should be warned about, never rejected.
#[derive(Debug, Clone)]
pub struct Config {
    /// Open the data file entirely into memory instead of streaming reads
    /// through a pooled reader over the file on disk.
    pub memory_mode: bool,
    /// Path to the binary data file, when loading from disk.
    pub binary_file_path: Option<PathBuf>,
    /// Enable the background file-modification watcher (§5 "Background work").
    pub auto_update: bool,
    /// Licence key used by auto-update; out of scope beyond being carried.
    pub licence_key: Option<String>,
    /// Poll interval for the file-modification watcher.
    pub cache_service_interval: Duration,
    /// Header names consulted, in order, when matching from a header map.
    pub override_user_agent_headers: Vec<String>,
    /// Maximum nodes a single match may evaluate before returning its
    /// best-so-far result with `IsComplete = false`. `None` means unbounded.
    pub node_evaluation_budget: Option<u64>,
    /// Capacity of the per-list two-generation cache (entities).
    pub entity_cache_size: usize,
    /// Capacity of the per-User-Agent result LRU in `Provider`.
    pub result_cache_size: usize,
    /// Hard cap on readers a `ReaderPool` will create. `None` is elastic.
    pub max_readers: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            memory_mode: false,
            binary_file_path: None,
            auto_update: false,
            licence_key: None,
            cache_service_interval: Duration::from_secs(1),
            override_user_agent_headers: vec!["User-Agent".to_string()],
            node_evaluation_budget: None,
            entity_cache_size: 10_000,
            result_cache_size: 10_000,
            max_readers: None,
        }
    }
}
