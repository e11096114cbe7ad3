use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::RwLock;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::io::Source;

/// Background file-modification watcher (§5 "Background work"). Polls the
/// data file's mtime on `Config::cache_service_interval` and, when it
/// changes, loads a fresh `Dataset` and swaps it into the shared lock. The
/// old dataset is disposed once nothing else is still holding it, rather
/// than on a timer, so an in-flight match against the stale snapshot is
/// never interrupted.
pub struct Watcher {
    stop: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl Watcher {
    pub fn spawn(path: PathBuf, dataset: Arc<RwLock<Arc<Dataset>>>, config: Config) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = stop.clone();

        let handle = std::thread::spawn(move || {
            let mut last_modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok();

            while !thread_stop.load(Ordering::Relaxed) {
                if !sleep_interruptibly(config.cache_service_interval, &thread_stop) {
                    break;
                }

                let modified: Option<SystemTime> = std::fs::metadata(&path).and_then(|m| m.modified()).ok();
                if modified.is_none() || modified == last_modified {
                    continue;
                }

                // Reload from a copied working file, not the live path
                // directly (§5 "Background work") — the source file may
                // still be mid-write by whatever's publishing it.
                let working_copy = match copy_to_working_file(&path) {
                    Ok(p) => p,
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to copy updated data file, keeping current dataset");
                        continue;
                    }
                };

                let source = Source::from_temporary_path(&working_copy).resolve_memory_mode(config.memory_mode);
                let source = match source {
                    Ok(s) => s,
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to open updated data file, keeping current dataset");
                        continue;
                    }
                };

                match Dataset::open(source, &config) {
                    Ok(new_dataset) => {
                        let published = new_dataset.header.published_date();
                        // The old `Arc<Dataset>` drops here once this local
                        // binding goes out of scope; whichever clone of it
                        // (this one, or one an in-flight match still holds)
                        // is the last to drop runs `Dataset`'s own cleanup
                        // (see its `Drop` impl) — no refcount polling needed.
                        let _old = {
                            let mut guard = dataset.write();
                            std::mem::replace(&mut *guard, new_dataset)
                        };
                        last_modified = modified;
                        tracing::info!(?published, "swapped in reloaded dataset");
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to parse updated data file, keeping current dataset");
                    }
                }
            }
        });

        Watcher { stop, handle: Some(handle) }
    }
}

/// Copies the live data file to a fresh temporary path, so a reload never
/// reads a file that's still being written by whatever publishes it.
/// Grounded on the teacher's `memory/swap.rs::SwapManager`, which likewise
/// stages pages through `tempfile` rather than touching the original
/// source in place.
fn copy_to_working_file(path: &PathBuf) -> crate::error::Result<PathBuf> {
    let dir = path.parent().map(|p| p.to_path_buf()).unwrap_or_else(|| PathBuf::from("."));
    let tmp = tempfile::Builder::new().prefix(".devicedb-reload-").tempfile_in(&dir)?;
    std::fs::copy(path, tmp.path())?;
    Ok(tmp.into_temp_path().keep()?)
}

/// Sleeps in short slices so `Drop` doesn't block for a whole
/// `cache_service_interval` waiting for the poll loop to notice. Returns
/// `false` if the stop flag was observed before the full duration elapsed.
fn sleep_interruptibly(duration: std::time::Duration, stop: &AtomicBool) -> bool {
    const SLICE: std::time::Duration = std::time::Duration::from_millis(50);
    let mut remaining = duration;
    while remaining > std::time::Duration::ZERO {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        let slice = remaining.min(SLICE);
        std::thread::sleep(slice);
        remaining -= slice;
    }
    !stop.load(Ordering::Relaxed)
}

impl Drop for Watcher {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
