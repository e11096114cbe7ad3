use std::sync::Arc;

use crate::cache::GenerationalCache;
use crate::config::Config;
use crate::entities::StringRecord;
use crate::error::Result;
use crate::io::{ReaderPool, Source};
use crate::storage::VariableRecord;
use crate::trie::header::TrieHeader;
use crate::trie::node::TrieNode;

/// The alternative byte-indexed decision tree (§4.H): one edge per User-Agent
/// byte rather than the character-positional format's multi-byte runs.
/// Smaller and faster to walk than the node trie, at the cost of the
/// Numeric/Nearest/Closest fallbacks the main matcher offers.
pub struct TrieDataset {
    pool: Arc<ReaderPool>,
    header: TrieHeader,
    devices: GenerationalCache<u64, Arc<StringRecord>>,
    nodes: GenerationalCache<u64, Arc<TrieNode>>,
}

/// Outcome of a trie walk: the device id string resolved, if any, and how
/// many of the input's bytes were actually consumed walking edges.
pub struct TrieMatch {
    pub device_id: Option<Arc<str>>,
    pub bytes_matched: usize,
}

impl TrieDataset {
    pub fn open(source: Source, config: &Config) -> Result<Self> {
        let source = Arc::new(source);
        let pool = Arc::new(ReaderPool::new(source, config.max_readers));

        let header = {
            let mut reader = pool.acquire()?;
            TrieHeader::decode(&mut reader)?
        };

        let devices = GenerationalCache::new(config.entity_cache_size);
        let nodes = GenerationalCache::new(config.entity_cache_size);

        Ok(TrieDataset { pool, header, devices, nodes })
    }

    fn node_at(&self, relative_offset: u64) -> Result<Arc<TrieNode>> {
        let pool = &self.pool;
        let header = &self.header;
        self.nodes.get_or_load(&relative_offset, || {
            let mut reader = pool.acquire()?;
            let absolute = header.nodes_region_offset + relative_offset;
            TrieNode::decode_at(&mut reader, absolute)
        })
    }

    fn device_at(&self, device_index: u32) -> Result<Arc<StringRecord>> {
        let key = device_index as u64;
        self.devices.get_or_load(&key, || {
            let mut reader = self.pool.acquire()?;
            reader.seek(self.header.devices_region_offset + key)?;
            let (record, _) = StringRecord::decode(&mut reader)?;
            Ok(Arc::new(record))
        })
    }

    /// Resolves a node's device, following the lookup-list indirection used
    /// by nodes that inherit a shared device record rather than carrying
    /// their own index.
    fn own_device(&self, node: &TrieNode) -> Result<Option<u32>> {
        if let Some(index) = node.device_index {
            return Ok(Some(index));
        }
        if let Some(lookup_offset) = node.lookup_list_offset {
            let mut reader = self.pool.acquire()?;
            reader.seek(self.header.lookup_list_region_offset + lookup_offset)?;
            return Ok(Some(reader.read_u32()?));
        }
        Ok(None)
    }

    /// Walks one byte per node starting from the root, tracking the most
    /// recently seen device index so a node that doesn't redefine one
    /// inherits its nearest ancestor's.
    pub fn match_bytes(&self, ua: &[u8]) -> Result<TrieMatch> {
        let mut node = self.node_at(0)?;
        let mut device_index = self.own_device(&node)?;
        let mut bytes_matched = 0usize;

        for &byte in ua {
            let Some(child_offset) = node.child_for_byte(byte) else { break };
            node = self.node_at(child_offset)?;
            bytes_matched += 1;
            if let Some(index) = self.own_device(&node)? {
                device_index = Some(index);
            }
        }

        let device_id = match device_index {
            Some(index) => Some(self.device_at(index)?.text.clone().into()),
            None => None,
        };

        Ok(TrieMatch { device_id, bytes_matched })
    }

    pub fn header(&self) -> &TrieHeader {
        &self.header
    }
}
