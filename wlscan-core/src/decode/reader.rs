/*!
 * Bounds-Checked Record Reader
 * Little-endian field access at fixed offsets inside one record
 */

use byteorder::{ByteOrder, LittleEndian};

use crate::error::RecordDecodeError;

/// Read-only view over one record; every access is validated against the
/// record length before touching memory.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn slice(&self, offset: usize, width: usize) -> Result<&'a [u8], RecordDecodeError> {
        offset
            .checked_add(width)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or(RecordDecodeError::OutOfBounds {
                offset,
                width,
                len: self.bytes.len(),
            })
    }

    pub fn u8(&self, offset: usize) -> Result<u8, RecordDecodeError> {
        Ok(self.slice(offset, 1)?[0])
    }

    pub fn u16(&self, offset: usize) -> Result<u16, RecordDecodeError> {
        Ok(LittleEndian::read_u16(self.slice(offset, 2)?))
    }

    pub fn u32(&self, offset: usize) -> Result<u32, RecordDecodeError> {
        Ok(LittleEndian::read_u32(self.slice(offset, 4)?))
    }

    pub fn i32(&self, offset: usize) -> Result<i32, RecordDecodeError> {
        Ok(LittleEndian::read_i32(self.slice(offset, 4)?))
    }

    pub fn u64(&self, offset: usize) -> Result<u64, RecordDecodeError> {
        Ok(LittleEndian::read_u64(self.slice(offset, 8)?))
    }

    pub fn array<const N: usize>(&self, offset: usize) -> Result<[u8; N], RecordDecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.slice(offset, N)?);
        Ok(out)
    }
}
