use std::collections::VecDeque;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, ErrorKind, Result};
use crate::io::reader::Reader;
use crate::io::source::Source;
use crate::stats::PoolStats;

/// Pool of `Reader`s over a single `Source`. `acquire` hands out exclusive
/// use of a reader, creating one on demand when the free list is empty and
/// either no cap is configured or the cap has not yet been reached;
/// `release` returns it to the free list for reuse.
pub struct ReaderPool {
    source: Arc<Source>,
    free: Mutex<VecDeque<Reader>>,
    max_readers: Option<usize>,
    stats: PoolStats,
}

/// RAII guard returned by `acquire`; the reader goes back to the pool's
/// free list when the guard drops.
pub struct PooledReader<'a> {
    pool: &'a ReaderPool,
    reader: Option<Reader>,
}

impl<'a> std::ops::Deref for PooledReader<'a> {
    type Target = Reader;
    fn deref(&self) -> &Reader {
        self.reader.as_ref().expect("reader taken")
    }
}

impl<'a> std::ops::DerefMut for PooledReader<'a> {
    fn deref_mut(&mut self) -> &mut Reader {
        self.reader.as_mut().expect("reader taken")
    }
}

impl<'a> Drop for PooledReader<'a> {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.take() {
            self.pool.release(reader);
        }
    }
}

impl ReaderPool {
    pub fn new(source: Arc<Source>, max_readers: Option<usize>) -> Self {
        ReaderPool {
            source,
            free: Mutex::new(VecDeque::new()),
            max_readers,
            stats: PoolStats::default(),
        }
    }

    pub fn acquire(&self) -> Result<PooledReader<'_>> {
        if let Some(reader) = self.free.lock().pop_front() {
            return Ok(PooledReader { pool: self, reader: Some(reader) });
        }

        let created = self.stats.readers_created.load(Ordering::Relaxed);
        if let Some(cap) = self.max_readers {
            if created as usize >= cap {
                return Err(Error::new(ErrorKind::PoolExhausted, "reader pool exhausted"));
            }
        }

        let reader = Reader::open(&self.source)?;
        self.stats.readers_created.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(readers_created = created + 1, "created new pooled reader");
        Ok(PooledReader { pool: self, reader: Some(reader) })
    }

    fn release(&self, reader: Reader) {
        self.free.lock().push_back(reader);
        self.stats.readers_queued.store(self.free.lock().len() as u64, Ordering::Relaxed);
    }

    pub fn stats(&self) -> crate::stats::PoolStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn dispose(&self) {
        self.free.lock().clear();
        self.source.cleanup();
    }
}
