use std::sync::Arc;

use crate::cache::GenerationalCache;
use crate::error::{Error, ErrorKind, Result};
use crate::io::{Reader, ReaderPool};

/// A record whose on-disk size is a constant stride, independent of its
/// contents (properties, values, components, maps, v3.1 signatures,
/// ranked-signature indices).
pub trait FixedRecord: Sized {
    const SIZE: usize;
    fn decode(reader: &mut Reader) -> Result<Self>;
}

/// Array indexed by integer position: `get(index)` is one multiplication
/// and one pooled read, wrapped in a two-generation cache per §4.E.
pub struct FixedRecordList<T: FixedRecord> {
    pool: Arc<ReaderPool>,
    region_offset: u64,
    count: u32,
    cache: GenerationalCache<u32, Arc<T>>,
}

impl<T: FixedRecord> FixedRecordList<T> {
    pub fn new(pool: Arc<ReaderPool>, region_offset: u64, count: u32, cache_capacity: usize) -> Self {
        FixedRecordList { pool, region_offset, count, cache: GenerationalCache::new(cache_capacity) }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn get(&self, index: u32) -> Result<Arc<T>> {
        if index >= self.count {
            return Err(Error::new(
                ErrorKind::DatasetFormat,
                format!("fixed record index {index} out of range (count {})", self.count),
            ));
        }
        let offset = self.region_offset + index as u64 * T::SIZE as u64;
        self.cache.get_or_load(&index, || {
            let mut reader = self.pool.acquire()?;
            reader.seek(offset)?;
            T::decode(&mut reader).map(Arc::new)
        })
    }

    pub fn cache_stats(&self) -> crate::stats::CacheStatsSnapshot {
        self.cache.stats()
    }
}
