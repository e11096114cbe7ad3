use crate::error::{Error, ErrorKind, Result};
use crate::io::Reader;

/// Width of the child offsets stored in one node's children block, chosen
/// per-node so small subtrees don't pay for 64-bit offsets (§4.H).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetWidth {
    U16,
    U32,
    U64,
}

impl OffsetWidth {
    fn from_u8(b: u8) -> Result<Self> {
        match b {
            0 => Ok(OffsetWidth::U16),
            1 => Ok(OffsetWidth::U32),
            2 => Ok(OffsetWidth::U64),
            other => Err(Error::new(ErrorKind::DatasetFormat, format!("unsupported trie offset width {other}"))),
        }
    }
}

/// Sentinel raw value meaning "this node has neither an own device index
/// nor a lookup-list reference" — a pure routing node on the way to a
/// more specific one.
const NO_DEVICE: i32 = i32::MIN;

/// One step of the byte-indexed trie: unlike the character-positional
/// `Node`, a `TrieNode` consumes exactly one User-Agent byte per edge.
///
/// The device a node resolves to is either carried inline (`device_index`),
/// looked up through the lookup-list region at `lookup_list_offset`, or
/// absent entirely (a node on the path to a more specific descendant).
/// Which applies is encoded in the sign of the raw offset field read from
/// the file: negative means "look up", `NO_DEVICE` means "neither",
/// anything else means "read an inline index next".
#[derive(Debug, Clone)]
pub struct TrieNode {
    pub offset: u64,
    pub lookup_list_offset: Option<u64>,
    pub device_index: Option<u32>,
    pub children: Vec<(u8, u64)>,
}

impl TrieNode {
    pub fn child_for_byte(&self, byte: u8) -> Option<u64> {
        self.children.binary_search_by_key(&byte, |&(b, _)| b).ok().map(|i| self.children[i].1)
    }

    pub fn decode_at(reader: &mut Reader, offset: u64) -> Result<Self> {
        reader.seek(offset)?;

        let raw = reader.read_i32()?;
        let (lookup_list_offset, device_index) = if raw == NO_DEVICE {
            (None, None)
        } else if raw < 0 {
            (Some((-(raw as i64) - 1) as u64), None)
        } else {
            (None, Some(reader.read_u32()?))
        };

        let child_count = reader.read_u16()?;
        let width = OffsetWidth::from_u8(reader.read_u8()?)?;

        let mut children = Vec::with_capacity(child_count as usize);
        for _ in 0..child_count {
            let byte = reader.read_u8()?;
            let child_offset = match width {
                OffsetWidth::U16 => reader.read_u16()? as u64,
                OffsetWidth::U32 => reader.read_u32()? as u64,
                OffsetWidth::U64 => reader.read_u64()?,
            };
            children.push((byte, child_offset));
        }
        children.sort_by_key(|&(b, _)| b);

        Ok(TrieNode { offset, lookup_list_offset, device_index, children })
    }
}
