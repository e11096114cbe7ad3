use crate::error::Result;
use crate::io::Reader;
use crate::storage::VariableRecord;

/// An axis of the device (e.g. Hardware, Software, Browser, Crawler)
/// against which profiles are defined.
///
/// Implemented as a variable-size record even though §4.D groups components
/// with the fixed-stride lists: a component's property-index array has a
/// length that varies per component, so giving it a constant stride would
/// mean padding every record to the widest component. See DESIGN.md.
#[derive(Debug, Clone)]
pub struct Component {
    pub component_id: u8,
    pub name_offset: u32,
    pub default_profile_offset: u32,
    pub property_indices: Vec<u32>,
}

impl VariableRecord for Component {
    fn decode(reader: &mut Reader) -> Result<(Self, u64)> {
        let component_id = reader.read_u8()?;
        let name_offset = reader.read_u32()?;
        let default_profile_offset = reader.read_u32()?;
        let property_count = reader.read_u16()?;
        let mut property_indices = Vec::with_capacity(property_count as usize);
        for _ in 0..property_count {
            property_indices.push(reader.read_u32()?);
        }
        let len = 1 + 4 + 4 + 2 + property_count as u64 * 4;
        Ok((Component { component_id, name_offset, default_profile_offset, property_indices }, len))
    }
}
