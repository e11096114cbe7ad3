use std::sync::Arc;

use crate::cache::GenerationalCache;
use crate::error::{Error, ErrorKind, Result};
use crate::io::{Reader, ReaderPool};

/// A record whose on-disk size varies with its contents (profiles, nodes,
/// signatures in v3.2, strings). `decode` returns the parsed record and the
/// number of bytes it occupied, so the list can advance the cursor to the
/// next record without a separate length table.
pub trait VariableRecord: Sized {
    fn decode(reader: &mut Reader) -> Result<(Self, u64)>;

    /// Called with the record's own starting byte offset right after
    /// `decode`, for types that need to know their own address (nodes and
    /// signatures reference each other by offset, so each must remember
    /// where it lives). Most records ignore this.
    fn set_offset(&mut self, _offset: u64) {}
}

/// List keyed by byte offset: get-by-offset is random access, enumerate-all
/// walks sequentially advancing by each record's declared length. A
/// companion `index` maps logical index to byte offset for callers that
/// enumerate by position (e.g. `RankedSignatureIndex`, `Component`'s
/// property-index arrays referencing other variable lists by position).
pub struct VariableRecordList<T: VariableRecord> {
    pool: Arc<ReaderPool>,
    index: Vec<u64>,
    cache: GenerationalCache<u64, Arc<T>>,
}

impl<T: VariableRecord> VariableRecordList<T> {
    /// Scans `count` records starting at `region_offset`, recording each
    /// record's starting byte offset, without retaining the decoded value.
    pub fn scan(
        pool: Arc<ReaderPool>,
        region_offset: u64,
        count: u32,
        cache_capacity: usize,
    ) -> Result<Self> {
        let mut index = Vec::with_capacity(count as usize);
        let mut reader = pool.acquire()?;
        let mut offset = region_offset;
        for _ in 0..count {
            reader.seek(offset)?;
            let (_, len) = T::decode(&mut reader)?;
            if len == 0 {
                return Err(Error::new(
                    ErrorKind::DatasetFormat,
                    "variable record reported zero length; would never advance",
                ));
            }
            index.push(offset);
            offset += len;
        }
        drop(reader);
        Ok(VariableRecordList { pool, index, cache: GenerationalCache::new(cache_capacity) })
    }

    pub fn count(&self) -> usize {
        self.index.len()
    }

    pub fn offset_of(&self, index: usize) -> Result<u64> {
        self.index.get(index).copied().ok_or_else(|| {
            Error::new(ErrorKind::DatasetFormat, format!("variable record index {index} out of range"))
        })
    }

    pub fn get_by_offset(&self, offset: u64) -> Result<Arc<T>> {
        self.cache.get_or_load(&offset, || {
            let mut reader = self.pool.acquire()?;
            reader.seek(offset)?;
            let (mut record, _) = T::decode(&mut reader)?;
            record.set_offset(offset);
            Ok(Arc::new(record))
        })
    }

    pub fn get_by_index(&self, index: usize) -> Result<Arc<T>> {
        let offset = self.offset_of(index)?;
        self.get_by_offset(offset)
    }

    pub fn enumerate_all(&self) -> Result<Vec<Arc<T>>> {
        self.index.iter().map(|&offset| self.get_by_offset(offset)).collect()
    }

    pub fn cache_stats(&self) -> crate::stats::CacheStatsSnapshot {
        self.cache.stats()
    }
}
