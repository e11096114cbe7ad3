use crate::error::Result;
use crate::io::Reader;
use crate::storage::VariableRecord;

/// Groups the values selected for a single component (e.g. Hardware,
/// Software, Browser, Crawler) on one device. `profile_id` is stable
/// across dataset rebuilds so long as the device's component composition
/// is unchanged; it, not the byte offset, is what appears in a `DeviceId`.
#[derive(Debug, Clone)]
pub struct Profile {
    pub component_id: u8,
    pub profile_id: u32,
    pub value_indices: Vec<u32>,
    pub signature_indices: Vec<u32>,
}

impl VariableRecord for Profile {
    fn decode(reader: &mut Reader) -> Result<(Self, u64)> {
        let component_id = reader.read_u8()?;
        let profile_id = reader.read_u32()?;
        let value_index_count = reader.read_u32()?;
        let signature_index_count = reader.read_u32()?;

        let mut value_indices = Vec::with_capacity(value_index_count as usize);
        for _ in 0..value_index_count {
            value_indices.push(reader.read_u32()?);
        }
        let mut signature_indices = Vec::with_capacity(signature_index_count as usize);
        for _ in 0..signature_index_count {
            signature_indices.push(reader.read_u32()?);
        }

        let len = 1 + 4 + 4 + 4 + (value_index_count as u64 + signature_index_count as u64) * 4;
        Ok((Profile { component_id, profile_id, value_indices, signature_indices }, len))
    }
}
