use crate::error::{Error, ErrorKind, Result};
use crate::io::Reader;

pub const MAGIC: [u8; 4] = *b"DVTR";

/// Fixed-size header for the byte-indexed alternative provider file (§4.H):
/// copyright string, strings region, properties region, devices region and
/// lookup-list region are each addressed by an explicit byte offset, same
/// as the character-positional format; the nodes region is addressed the
/// same way, with its length recorded alongside for bounds-checking tools.
#[derive(Debug, Clone)]
pub struct TrieHeader {
    pub copyright_offset: u32,
    pub strings_region_offset: u64,
    pub properties_region_offset: u64,
    pub devices_region_offset: u64,
    pub lookup_list_region_offset: u64,
    pub nodes_region_offset: u64,
    pub nodes_length: u64,
}

impl TrieHeader {
    pub fn decode(reader: &mut Reader) -> Result<Self> {
        let mut magic = [0u8; 4];
        for b in &mut magic {
            *b = reader.read_u8()?;
        }
        if magic != MAGIC {
            return Err(Error::new(ErrorKind::DatasetFormat, "bad magic bytes in trie header"));
        }

        let copyright_offset = reader.read_u32()?;
        let strings_region_offset = reader.read_u64()?;
        let properties_region_offset = reader.read_u64()?;
        let devices_region_offset = reader.read_u64()?;
        let lookup_list_region_offset = reader.read_u64()?;
        let nodes_region_offset = reader.read_u64()?;
        let nodes_length = reader.read_u64()?;

        Ok(TrieHeader {
            copyright_offset,
            strings_region_offset,
            properties_region_offset,
            devices_region_offset,
            lookup_list_region_offset,
            nodes_region_offset,
            nodes_length,
        })
    }
}
