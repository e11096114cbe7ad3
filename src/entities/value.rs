use crate::error::Result;
use crate::io::Reader;
use crate::storage::FixedRecord;

/// One admissible value of a `Property`, unique within that property.
#[derive(Debug, Clone)]
pub struct Value {
    pub name_offset: u32,
    pub description_offset: u32,
    pub url_offset: u32,
    pub property_index: u32,
}

impl FixedRecord for Value {
    const SIZE: usize = 4 + 4 + 4 + 4;

    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Value {
            name_offset: reader.read_u32()?,
            description_offset: reader.read_u32()?,
            url_offset: reader.read_u32()?,
            property_index: reader.read_u32()?,
        })
    }
}
