use crate::error::Result;
use crate::io::Reader;
use crate::storage::VariableRecord;

/// Associates a data-file region name (Lite / Premium / Enterprise tiering)
/// with the properties that belong to it.
#[derive(Debug, Clone)]
pub struct Map {
    pub name_offset: u32,
    pub property_indices: Vec<u32>,
}

impl VariableRecord for Map {
    fn decode(reader: &mut Reader) -> Result<(Self, u64)> {
        let name_offset = reader.read_u32()?;
        let property_count = reader.read_u32()?;
        let mut property_indices = Vec::with_capacity(property_count as usize);
        for _ in 0..property_count {
            property_indices.push(reader.read_u32()?);
        }
        let len = 4 + 4 + property_count as u64 * 4;
        Ok((Map { name_offset, property_indices }, len))
    }
}
