use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::entities::{Component, Map, Node, Profile, Property, RankedSignatureIndex, Signature, StringRecord};
use crate::entities::Value as Value_;
use crate::error::{Error, ErrorKind, Result};
use crate::header::{FormatVersion, Header};
use crate::io::{ReaderPool, Source};
use crate::storage::{FixedRecordList, VariableRecordList};

const INITIALISED: u8 = 1;
const DISPOSED: u8 = 2;

/// `Created -> Initialised -> (InUse)* -> Disposed`. `Dataset::open`
/// performs header parsing and entity init atomically from the caller's
/// perspective, so a `Dataset` value is only ever observed already
/// Initialised; transitions from there are one-way, and any call against a
/// disposed dataset fails with `ErrorKind::DatasetDisposed`.
pub struct Dataset {
    state: AtomicU8,
    pool: Arc<ReaderPool>,
    pub header: Header,

    strings: VariableRecordList<StringRecord>,
    components: VariableRecordList<Component>,
    maps: VariableRecordList<Map>,
    properties: FixedRecordList<Property>,
    values: FixedRecordList<Value_>,
    profiles: VariableRecordList<Profile>,
    signatures: VariableRecordList<Signature>,
    ranked_signature_indexes: FixedRecordList<RankedSignatureIndex>,
    nodes: VariableRecordList<Node>,

    /// (name, property index) sorted by name for `Properties.ByName`.
    property_name_index: Vec<(String, u32)>,
    /// (leading byte, node offset) for nodes with no parent, sorted by
    /// byte: the root node set §4.G step 1 traversal starts from.
    root_nodes: Vec<(u8, u64)>,
    default_signature: Arc<Signature>,

    /// All signatures loaded up front and kept around for the matcher
    /// (Design Notes §9 permits eager entity computation at init in
    /// exchange for simpler concurrency; with a trie-sized signature
    /// count this is a modest, one-time cost).
    all_signatures: Vec<Arc<Signature>>,
    /// Index into `all_signatures`, sorted by `Signature::node_offsets`,
    /// for the binary-search exact lookup of §4.G step 2.
    signatures_by_nodes: Vec<u32>,
    /// Node offset -> indices into `all_signatures` referencing that node,
    /// for the Nearest strategy's "shares at least one node" scan.
    node_to_signatures: HashMap<u64, Vec<u32>>,
    /// `Profile::profile_id` -> byte offset, for `Provider`'s profile-override
    /// lookup (§4.I): overrides name profiles by their stable public id, not
    /// by offset.
    profile_id_index: HashMap<u32, u64>,
}

impl Dataset {
    pub fn open(source: Source, config: &Config) -> Result<Arc<Dataset>> {
        let source = source.resolve_memory_mode(config.memory_mode)?;
        let source = Arc::new(source);
        let pool = Arc::new(ReaderPool::new(source, config.max_readers));

        let header = {
            let mut reader = pool.acquire()?;
            Header::decode(&mut reader)?
        };

        if header.version != FormatVersion::V32 {
            return Err(Error::new(
                ErrorKind::DatasetFormat,
                "only format version 3.2 is supported by this build",
            ));
        }

        let cache_cap = config.entity_cache_size;

        let strings =
            VariableRecordList::<StringRecord>::scan(pool.clone(), header.strings_offset, header.strings_count, cache_cap)?;
        let components =
            VariableRecordList::<Component>::scan(pool.clone(), header.components_offset, header.components_count, cache_cap)?;
        let maps = VariableRecordList::<Map>::scan(pool.clone(), header.maps_offset, header.maps_count, cache_cap)?;
        let properties =
            FixedRecordList::<Property>::new(pool.clone(), header.properties_offset, header.properties_count, cache_cap);
        let values = FixedRecordList::<Value_>::new(pool.clone(), header.values_offset, header.values_count, cache_cap);
        let profiles =
            VariableRecordList::<Profile>::scan(pool.clone(), header.profiles_offset, header.profiles_count, cache_cap)?;
        let signatures =
            VariableRecordList::<Signature>::scan(pool.clone(), header.signatures_offset, header.signatures_count, cache_cap)?;
        let ranked_signature_indexes = FixedRecordList::<RankedSignatureIndex>::new(
            pool.clone(),
            header.ranked_signature_indexes_offset,
            header.ranked_signature_indexes_count,
            cache_cap,
        );
        let nodes = VariableRecordList::<Node>::scan(pool.clone(), header.nodes_offset, header.nodes_count, cache_cap)?;

        let mut property_name_index = Vec::with_capacity(properties.count() as usize);
        for i in 0..properties.count() {
            let property = properties.get(i)?;
            let name = strings.get_by_offset(property.name_offset as u64)?.text.clone();
            property_name_index.push((name, i));
        }
        property_name_index.sort_by(|a, b| a.0.cmp(&b.0));

        let mut root_nodes = Vec::new();
        for i in 0..nodes.count() {
            let offset = nodes.offset_of(i)?;
            let node = nodes.get_by_offset(offset)?;
            if node.parent_offset.is_none() {
                let leading_byte = node.characters.first().copied().unwrap_or(0);
                root_nodes.push((leading_byte, offset));
            }
        }
        root_nodes.sort_by_key(|&(b, _)| b);

        let mut default_profile_offsets = Vec::with_capacity(components.count());
        for component in components.enumerate_all()? {
            default_profile_offsets.push(component.default_profile_offset as u64);
        }
        default_profile_offsets.sort_unstable();
        let default_signature = Arc::new(Signature::synthetic_default(default_profile_offsets));

        let all_signatures = signatures.enumerate_all()?;

        let mut signatures_by_nodes: Vec<u32> = (0..all_signatures.len() as u32).collect();
        signatures_by_nodes.sort_by(|&a, &b| {
            all_signatures[a as usize].compare_to(&all_signatures[b as usize])
        });

        let mut node_to_signatures: HashMap<u64, Vec<u32>> = HashMap::new();
        for (i, sig) in all_signatures.iter().enumerate() {
            for &node_offset in &sig.node_offsets {
                node_to_signatures.entry(node_offset).or_default().push(i as u32);
            }
        }

        let mut profile_id_index = HashMap::with_capacity(profiles.count());
        for i in 0..profiles.count() {
            let offset = profiles.offset_of(i)?;
            let profile = profiles.get_by_offset(offset)?;
            profile_id_index.insert(profile.profile_id, offset);
        }

        Ok(Arc::new(Dataset {
            state: AtomicU8::new(INITIALISED),
            pool,
            header,
            strings,
            components,
            maps,
            properties,
            values,
            profiles,
            signatures,
            ranked_signature_indexes,
            nodes,
            property_name_index,
            root_nodes,
            default_signature,
            all_signatures,
            signatures_by_nodes,
            node_to_signatures,
            profile_id_index,
        }))
    }

    fn guard_active(&self) -> Result<()> {
        if self.state.load(Ordering::Acquire) == DISPOSED {
            return Err(Error::new(ErrorKind::DatasetDisposed, "dataset has been disposed"));
        }
        Ok(())
    }

    /// Idempotent: only the transition into `DISPOSED` runs pool/source
    /// cleanup, so calling this more than once (explicitly, then again from
    /// `Drop`) is harmless.
    pub fn dispose(&self) {
        if self.state.swap(DISPOSED, Ordering::AcqRel) != DISPOSED {
            self.pool.dispose();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.state.load(Ordering::Acquire) == DISPOSED
    }

    pub fn min_user_agent_length(&self) -> u16 {
        self.header.min_user_agent_length
    }

    pub fn next_update_epoch_days(&self) -> i32 {
        self.header.next_update_epoch_days
    }

    pub fn root_nodes(&self) -> &[(u8, u64)] {
        &self.root_nodes
    }

    pub fn default_signature(&self) -> Arc<Signature> {
        self.default_signature.clone()
    }

    pub fn string_at(&self, offset: u64) -> Result<Arc<StringRecord>> {
        self.guard_active()?;
        self.strings.get_by_offset(offset)
    }

    pub fn node_at(&self, offset: u64) -> Result<Arc<Node>> {
        self.guard_active()?;
        self.nodes.get_by_offset(offset)
    }

    pub fn profile_at(&self, offset: u64) -> Result<Arc<Profile>> {
        self.guard_active()?;
        self.profiles.get_by_offset(offset)
    }

    /// Looks up a profile by its stable public id rather than its byte
    /// offset, for `Provider`'s profile-override logic (§4.I). `None` if no
    /// profile in the dataset carries that id.
    pub fn profile_by_id(&self, profile_id: u32) -> Result<Option<Arc<Profile>>> {
        self.guard_active()?;
        match self.profile_id_index.get(&profile_id) {
            Some(&offset) => Ok(Some(self.profiles.get_by_offset(offset)?)),
            None => Ok(None),
        }
    }

    pub fn component_at_index(&self, index: usize) -> Result<Arc<Component>> {
        self.guard_active()?;
        self.components.get_by_index(index)
    }

    pub fn components(&self) -> Result<Vec<Arc<Component>>> {
        self.guard_active()?;
        self.components.enumerate_all()
    }

    pub fn property_at_index(&self, index: u32) -> Result<Arc<Property>> {
        self.guard_active()?;
        self.properties.get(index)
    }

    pub fn property_count(&self) -> u32 {
        self.properties.count()
    }

    pub fn value_at_index(&self, index: u32) -> Result<Arc<Value_>> {
        self.guard_active()?;
        self.values.get(index)
    }

    /// Every admissible value for a property, reading the
    /// `first_value_index..=last_value_index` range off the `Property`
    /// record itself (§6 region 11). Empty for a property with no declared
    /// value range (`last_value_index < first_value_index`, e.g. a
    /// freeform string property).
    pub fn property_value_range(&self, property_index: u32) -> Result<Vec<Arc<Value_>>> {
        self.guard_active()?;
        let property = self.properties.get(property_index)?;
        if property.last_value_index < property.first_value_index {
            return Ok(Vec::new());
        }
        (property.first_value_index..=property.last_value_index).map(|i| self.values.get(i)).collect()
    }

    pub fn signature_count(&self) -> usize {
        self.all_signatures.len()
    }

    pub fn signature_by_index(&self, index: usize) -> Option<Arc<Signature>> {
        self.all_signatures.get(index).cloned()
    }

    pub fn all_signatures(&self) -> &[Arc<Signature>] {
        &self.all_signatures
    }

    /// Binary search for a signature whose node-offset vector equals
    /// `nodes` exactly (§4.G step 2).
    pub fn find_exact(&self, nodes: &[u64]) -> Option<Arc<Signature>> {
        let idx = self
            .signatures_by_nodes
            .binary_search_by(|&i| self.all_signatures[i as usize].node_offsets.as_slice().cmp(nodes))
            .ok()?;
        Some(self.all_signatures[self.signatures_by_nodes[idx] as usize].clone())
    }

    /// Every signature sharing at least one node with the given node
    /// offsets, deduplicated (§4.G step 4).
    pub fn signatures_sharing_any_node(&self, node_offsets: &[u64]) -> Vec<Arc<Signature>> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for &node_offset in node_offsets {
            if let Some(indices) = self.node_to_signatures.get(&node_offset) {
                for &i in indices {
                    if seen.insert(i) {
                        out.push(self.all_signatures[i as usize].clone());
                    }
                }
            }
        }
        out
    }

    pub fn ranked_signature_index(&self, rank_position: u32) -> Result<Arc<RankedSignatureIndex>> {
        self.guard_active()?;
        self.ranked_signature_indexes.get(rank_position)
    }

    pub fn ranked_signature_count(&self) -> u32 {
        self.ranked_signature_indexes.count()
    }

    /// Binary search over the sorted name index; missing names return
    /// `None` rather than failing, per §4.I.
    pub fn property_by_name(&self, name: &str) -> Option<(u32, String)> {
        self.property_name_index
            .binary_search_by(|(n, _)| n.as_str().cmp(name))
            .ok()
            .map(|i| {
                let (n, idx) = &self.property_name_index[i];
                (*idx, n.clone())
            })
    }

    pub fn maps(&self) -> Result<Vec<Arc<Map>>> {
        self.guard_active()?;
        self.maps.enumerate_all()
    }

    pub fn pool(&self) -> &Arc<ReaderPool> {
        &self.pool
    }
}

/// Backstop for "the old one is disposed after its in-flight matches drain
/// (reference count reaches zero)" (§5 "Background work"): the last
/// `Arc<Dataset>` to drop, whenever that happens — in `Watcher`'s reload
/// loop, in a caller holding its own clone, anywhere — runs pool/source
/// cleanup exactly once. `Watcher` no longer needs to poll
/// `Arc::strong_count` itself; it can just let its local clone of the old
/// dataset fall out of scope.
impl Drop for Dataset {
    fn drop(&mut self) {
        self.dispose();
    }
}
