use crate::error::{Error, ErrorKind, Result};
use crate::io::Reader;

pub const MAGIC: [u8; 4] = *b"DVDB";

/// The two binary formats the reference data-file layout supports in
/// parallel (§3, §6); v3.1 lacks numeric-child node blocks and uses
/// fixed-size signature records, v3.2 adds both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    V31,
    V32,
}

impl FormatVersion {
    fn from_u8(b: u8) -> Result<Self> {
        match b {
            1 => Ok(FormatVersion::V31),
            2 => Ok(FormatVersion::V32),
            other => Err(Error::new(ErrorKind::DatasetFormat, format!("unsupported format version {other}"))),
        }
    }
}

/// Fixed-size header describing format version, dates, region counts and
/// byte offsets. All multi-byte integers are little-endian.
#[derive(Debug, Clone)]
pub struct Header {
    pub version: FormatVersion,
    pub publish_date_epoch_days: i32,
    pub next_update_epoch_days: i32,
    pub copyright_offset: u32,
    pub age: u16,
    pub min_user_agent_length: u16,

    pub strings_count: u32,
    pub components_count: u32,
    pub maps_count: u32,
    pub properties_count: u32,
    pub values_count: u32,
    pub profiles_count: u32,
    pub signatures_count: u32,
    pub ranked_signature_indexes_count: u32,
    pub nodes_count: u32,

    pub strings_offset: u64,
    pub components_offset: u64,
    pub maps_offset: u64,
    pub properties_offset: u64,
    pub values_offset: u64,
    pub profiles_offset: u64,
    pub signatures_offset: u64,
    pub ranked_signature_indexes_offset: u64,
    pub nodes_offset: u64,
}

impl Header {
    pub fn decode(reader: &mut Reader) -> Result<Self> {
        let mut magic = [0u8; 4];
        for b in &mut magic {
            *b = reader.read_u8()?;
        }
        if magic != MAGIC {
            return Err(Error::new(ErrorKind::DatasetFormat, "bad magic bytes in header"));
        }
        let version = FormatVersion::from_u8(reader.read_u8()?)?;

        let publish_date_epoch_days = reader.read_i32()?;
        let next_update_epoch_days = reader.read_i32()?;
        let copyright_offset = reader.read_u32()?;
        let age = reader.read_u16()?;
        let min_user_agent_length = reader.read_u16()?;

        let strings_count = reader.read_u32()?;
        let components_count = reader.read_u32()?;
        let maps_count = reader.read_u32()?;
        let properties_count = reader.read_u32()?;
        let values_count = reader.read_u32()?;
        let profiles_count = reader.read_u32()?;
        let signatures_count = reader.read_u32()?;
        let ranked_signature_indexes_count = reader.read_u32()?;
        let nodes_count = reader.read_u32()?;

        let strings_offset = reader.read_u64()?;
        let components_offset = reader.read_u64()?;
        let maps_offset = reader.read_u64()?;
        let properties_offset = reader.read_u64()?;
        let values_offset = reader.read_u64()?;
        let profiles_offset = reader.read_u64()?;
        let signatures_offset = reader.read_u64()?;
        let ranked_signature_indexes_offset = reader.read_u64()?;
        let nodes_offset = reader.read_u64()?;

        Ok(Header {
            version,
            publish_date_epoch_days,
            next_update_epoch_days,
            copyright_offset,
            age,
            min_user_agent_length,
            strings_count,
            components_count,
            maps_count,
            properties_count,
            values_count,
            profiles_count,
            signatures_count,
            ranked_signature_indexes_count,
            nodes_count,
            strings_offset,
            components_offset,
            maps_offset,
            properties_offset,
            values_offset,
            profiles_offset,
            signatures_offset,
            ranked_signature_indexes_offset,
            nodes_offset,
        })
    }

    /// Total byte size of the header region, i.e. where region 2 (strings)
    /// would start if the file packed regions back to back with no
    /// padding. Implementations that lay the file out differently use the
    /// declared offsets instead; this is only a convenience for writers/tests.
    pub const ENCODED_SIZE: usize = 4 + 1 + 4 + 4 + 4 + 2 + 2 + 4 * 9 + 8 * 9;

    /// The calendar date this data file was published, if the epoch-days
    /// field decodes to a representable date.
    pub fn published_date(&self) -> Option<chrono::NaiveDate> {
        epoch_days_to_date(self.publish_date_epoch_days)
    }

    /// The calendar date a newer data file is expected, if any.
    pub fn next_update_date(&self) -> Option<chrono::NaiveDate> {
        epoch_days_to_date(self.next_update_epoch_days)
    }
}

fn epoch_days_to_date(days: i32) -> Option<chrono::NaiveDate> {
    chrono::DateTime::from_timestamp(i64::from(days) * 86_400, 0).map(|dt| dt.date_naive())
}
