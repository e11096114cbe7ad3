use std::cmp::Ordering;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::dataset::Dataset;
use crate::entities::node::Node;
use crate::entities::profile::Profile;
use crate::error::Result;
use crate::io::Reader;
use crate::storage::VariableRecord;

/// A set of (position, characters) fragments that must all match for the
/// signature to apply, plus the profile set ("device") it selects.
/// Stores only offsets; profiles/nodes/device-id are resolved lazily
/// through a `Dataset` and memoised once under this struct's lock, per the
/// "derived caches computed once" lifecycle rule.
pub struct Signature {
    pub offset: u64,
    pub profile_offsets: Vec<u64>,
    pub node_offsets: Vec<u64>,
    pub rank: i32,
    derived: Mutex<Derived>,
}

#[derive(Default)]
struct Derived {
    device_id: Option<Arc<str>>,
    length: Option<usize>,
    string_form: Option<Arc<str>>,
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signature")
            .field("offset", &self.offset)
            .field("profile_offsets", &self.profile_offsets)
            .field("node_offsets", &self.node_offsets)
            .field("rank", &self.rank)
            .finish()
    }
}

impl Signature {
    /// Synthesized for §4.G step 6 (`Method = None`): no file record backs
    /// it, so its offset is a sentinel and it has no node fragments.
    pub fn synthetic_default(profile_offsets: Vec<u64>) -> Self {
        Signature {
            offset: u64::MAX,
            profile_offsets,
            node_offsets: Vec::new(),
            rank: i32::MAX,
            derived: Mutex::new(Derived::default()),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.offset == u64::MAX
    }

    pub fn profiles(&self, dataset: &Dataset) -> Result<Vec<Arc<Profile>>> {
        self.profile_offsets.iter().map(|&o| dataset.profile_at(o)).collect()
    }

    pub fn nodes(&self, dataset: &Dataset) -> Result<Vec<Arc<Node>>> {
        self.node_offsets.iter().map(|&o| dataset.node_at(o)).collect()
    }

    /// `-`-joined ProfileIds in ascending ComponentId order (invariant 4).
    pub fn device_id(&self, dataset: &Dataset) -> Result<Arc<str>> {
        if let Some(id) = self.derived.lock().device_id.clone() {
            return Ok(id);
        }
        let mut profiles = self.profiles(dataset)?;
        profiles.sort_by_key(|p| p.component_id);
        let id: Arc<str> = profiles
            .iter()
            .map(|p| p.profile_id.to_string())
            .collect::<Vec<_>>()
            .join("-")
            .into();
        self.derived.lock().device_id = Some(id.clone());
        Ok(id)
    }

    /// Highest `position + run length` across the signature's nodes: the
    /// span of User-Agent bytes the signature's fragments cover.
    pub fn length(&self, dataset: &Dataset) -> Result<usize> {
        if let Some(len) = self.derived.lock().length {
            return Ok(len);
        }
        let nodes = self.nodes(dataset)?;
        let len = nodes.iter().map(|n| n.position as usize + n.run_len()).max().unwrap_or(0);
        self.derived.lock().length = Some(len);
        Ok(len)
    }

    /// Reconstructs the User-Agent characters by laying each node's byte
    /// run at its position; gaps between runs become spaces.
    pub fn render(&self, dataset: &Dataset) -> Result<Arc<str>> {
        if let Some(s) = self.derived.lock().string_form.clone() {
            return Ok(s);
        }
        let nodes = self.nodes(dataset)?;
        let len = self.length(dataset)?;
        let mut buf = vec![b' '; len];
        for node in &nodes {
            let start = node.position as usize;
            for (i, &b) in node.characters.iter().enumerate() {
                if start + i < buf.len() {
                    buf[start + i] = if b == 0 { b' ' } else { b };
                }
            }
        }
        let s: Arc<str> = String::from_utf8_lossy(&buf).into_owned().into();
        self.derived.lock().string_form = Some(s.clone());
        Ok(s)
    }

    /// Concatenation of each node's own characters, in node order, with no
    /// gap-filling — the signature side of the Closest strategy's
    /// node-position-restricted edit distance (§4.G step 5), as opposed to
    /// `render`'s full gap-filled string form.
    pub fn node_characters(&self, dataset: &Dataset) -> Result<Vec<u8>> {
        let nodes = self.nodes(dataset)?;
        let mut out = Vec::new();
        for node in &nodes {
            out.extend(node.characters.iter().map(|&b| if b == 0 { b' ' } else { b }));
        }
        Ok(out)
    }

    /// Lexicographic order over node-offset vectors; a strict prefix is
    /// lesser than its extension.
    pub fn compare_to(&self, other: &Signature) -> Ordering {
        self.node_offsets.cmp(&other.node_offsets)
    }

    /// True iff the first `nodes.len()` node offsets equal `nodes` in order.
    pub fn starts_with(&self, nodes: &[u64]) -> bool {
        nodes.len() <= self.node_offsets.len() && &self.node_offsets[..nodes.len()] == nodes
    }
}

impl VariableRecord for Signature {
    fn decode(reader: &mut Reader) -> Result<(Self, u64)> {
        let profile_count = reader.read_u8()?;
        let node_count = reader.read_u8()?;
        let rank = reader.read_i32()?;

        let mut profile_offsets = Vec::with_capacity(profile_count as usize);
        for _ in 0..profile_count {
            profile_offsets.push(reader.read_u64()?);
        }
        let mut node_offsets = Vec::with_capacity(node_count as usize);
        for _ in 0..node_count {
            node_offsets.push(reader.read_u64()?);
        }

        let len = 1 + 1 + 4 + (profile_count as u64 + node_count as u64) * 8;
        Ok((
            Signature {
                offset: 0,
                profile_offsets,
                node_offsets,
                rank,
                derived: Mutex::new(Derived::default()),
            },
            len,
        ))
    }

    fn set_offset(&mut self, offset: u64) {
        self.offset = offset;
    }
}
