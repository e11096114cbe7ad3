use std::io::{Read, Seek, SeekFrom};

use crate::error::{Error, ErrorKind, Result};
use crate::io::source::{Source, SourceHandle};

/// A cursor over one `Source` handle. Not thread-safe by itself — each
/// matcher thread obtains exclusive use of one `Reader` via the `ReaderPool`.
pub struct Reader {
    handle: SourceHandle,
    position: u64,
}

impl Reader {
    pub(crate) fn open(source: &Source) -> Result<Self> {
        Ok(Reader { handle: source.open_handle()?, position: 0 })
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn seek(&mut self, offset: u64) -> Result<()> {
        match &mut self.handle {
            SourceHandle::File(f) => {
                f.seek(SeekFrom::Start(offset))?;
            }
            SourceHandle::Bytes(_) | SourceHandle::Mmap(_) => {}
        }
        self.position = offset;
        Ok(())
    }

    fn bytes(&self) -> Option<&[u8]> {
        match &self.handle {
            SourceHandle::Bytes(b) => Some(&b[..]),
            SourceHandle::Mmap(m) => Some(&m[..]),
            SourceHandle::File(_) => None,
        }
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        if let Some(slice) = self.bytes() {
            let start = self.position as usize;
            let end = start.checked_add(len).ok_or_else(|| {
                Error::new(ErrorKind::DatasetFormat, "read past end of source")
            })?;
            if end > slice.len() {
                return Err(Error::new(ErrorKind::DatasetFormat, "read past end of source"));
            }
            self.position = end as u64;
            return Ok(slice[start..end].to_vec());
        }
        let mut buf = vec![0u8; len];
        if let SourceHandle::File(f) = &mut self.handle {
            f.read_exact(&mut buf)?;
        }
        self.position += len as u64;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let b = self.read_bytes(8)?;
        Ok(u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_u64()? as i64)
    }

    /// Reads bytes until (and consuming) a 0x00 terminator.
    pub fn read_null_terminated(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        loop {
            let b = self.read_u8()?;
            if b == 0 {
                break;
            }
            out.push(b);
        }
        Ok(out)
    }
}
