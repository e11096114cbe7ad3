use crate::error::Result;
use crate::io::Reader;
use crate::storage::FixedRecord;

/// An entry in the ordering over signatures by rank (popularity), used to
/// break ties in the Nearest/Closest strategies.
#[derive(Debug, Clone, Copy)]
pub struct RankedSignatureIndex(pub u32);

impl FixedRecord for RankedSignatureIndex {
    const SIZE: usize = 4;

    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(RankedSignatureIndex(reader.read_u32()?))
    }
}
