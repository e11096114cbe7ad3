use crate::error::Result;
use crate::io::Reader;
use crate::storage::VariableRecord;

/// A child edge for the numeric fallback strategy (§4.G step 3, v3.2 only):
/// a contiguous range of numeric values sharing one child node.
#[derive(Debug, Clone, Copy)]
pub struct NumericChildRange {
    pub low: u16,
    pub high: u16,
    pub child_offset: u64,
}

const NO_PARENT: u64 = u64::MAX;

/// A position in the character-positional trie. `position` is the byte
/// index into a candidate User-Agent where this node applies; `characters`
/// is the byte run the node represents when matched. Children are kept
/// sorted by their leading byte so traversal can binary-search them.
#[derive(Debug, Clone)]
pub struct Node {
    pub offset: u64,
    pub parent_offset: Option<u64>,
    pub position: u16,
    pub children: Vec<(u8, u64)>,
    pub numeric_children: Vec<NumericChildRange>,
    pub ranked_signature_count: u32,
    pub characters: Vec<u8>,
}

impl Node {
    /// Binary search for the child whose leading byte equals `byte`.
    pub fn child_for_byte(&self, byte: u8) -> Option<u64> {
        self.children
            .binary_search_by_key(&byte, |&(b, _)| b)
            .ok()
            .map(|i| self.children[i].1)
    }

    pub fn run_len(&self) -> usize {
        self.characters.len().max(1)
    }
}

impl VariableRecord for Node {
    fn decode(reader: &mut Reader) -> Result<(Self, u64)> {
        let parent_raw = reader.read_u64()?;
        let position = reader.read_u16()?;
        let child_count = reader.read_u16()?;
        let numeric_child_count = reader.read_u16()?;
        let ranked_signature_count = reader.read_u32()?;
        let characters_len = reader.read_u16()?;

        let mut children = Vec::with_capacity(child_count as usize);
        for _ in 0..child_count {
            let leading_byte = reader.read_u8()?;
            let child_offset = reader.read_u64()?;
            children.push((leading_byte, child_offset));
        }
        children.sort_by_key(|&(b, _)| b);

        let mut numeric_children = Vec::with_capacity(numeric_child_count as usize);
        for _ in 0..numeric_child_count {
            let low = reader.read_u16()?;
            let high = reader.read_u16()?;
            let child_offset = reader.read_u64()?;
            numeric_children.push(NumericChildRange { low, high, child_offset });
        }

        let characters = reader.read_bytes(characters_len as usize)?;

        let len = 8 + 2 + 2 + 2 + 4 + 2
            + child_count as u64 * 9
            + numeric_child_count as u64 * 12
            + characters_len as u64;

        let parent_offset = if parent_raw == NO_PARENT { None } else { Some(parent_raw) };

        Ok((
            Node {
                offset: 0,
                parent_offset,
                position,
                children,
                numeric_children,
                ranked_signature_count,
                characters,
            },
            len,
        ))
    }

    fn set_offset(&mut self, offset: u64) {
        self.offset = offset;
    }
}
