/*
    src/reader.rs
 */

//! Sequential byte reader over an in-memory copy of the PNG file.
//!
//! The format only ever needs to be read forward once, so the whole file is
//! loaded up front and walked with a cursor; no seeking back is required.

use crate::error::DecodeError;

pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

/// A chunk's framing fields, read but not yet CRC-verified or dispatched.
pub struct ChunkHeader {
    pub length: u32,
    pub type_name: [u8; 4],
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Reads `n` bytes and advances the cursor, or fails if fewer remain.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::chunk("unexpected end of file"));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads a big-endian `u32`.
    pub fn read_be_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Verifies the fixed 8-byte PNG signature at the current position.
    pub fn read_signature(&mut self) -> Result<(), DecodeError> {
        let sig = self.read_bytes(crate::constants::LENGTH_OF_SIGNATURE)?;
        if sig != crate::constants::PNG_SIGNATURE {
            return Err(DecodeError::Signature);
        }
        Ok(())
    }

    /// Reads a chunk's length + type fields. Returns `None` at end of input
    /// with no partial header pending (a well-formed file always ends with
    /// IEND before this would be reached).
    pub fn read_chunk_header(&mut self) -> Result<Option<ChunkHeader>, DecodeError> {
        if self.remaining() == 0 {
            return Ok(None);
        }
        let length = self.read_be_u32()?;
        let type_bytes = self.read_bytes(4)?;
        let mut type_name = [0u8; 4];
        type_name.copy_from_slice(type_bytes);
        Ok(Some(ChunkHeader { length, type_name }))
    }
}
