use crate::error::Result;
use crate::io::Reader;
use crate::storage::VariableRecord;

/// A length-prefixed UTF-8 byte sequence, addressed by byte offset within
/// the strings region. Decoded lossily: a data file is assumed trusted,
/// but a single malformed string should not abort a whole lookup.
#[derive(Debug, Clone)]
pub struct StringRecord {
    pub text: String,
}

impl VariableRecord for StringRecord {
    fn decode(reader: &mut Reader) -> Result<(Self, u64)> {
        let len = reader.read_u16()? as u64;
        let bytes = reader.read_bytes(len as usize)?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok((StringRecord { text }, 2 + len))
    }
}
