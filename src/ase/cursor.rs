//! Bounds-checked sequential reader over a byte slice.
//!
//! All multi-byte values are little-endian. Decoding goes through
//! `byteorder`, so the result does not depend on host endianness.

use byteorder::{ByteOrder, LittleEndian};

use crate::util::{Error, Result, Rgba};

/// Sequential reader that never reads past the end of its buffer.
///
/// Offsets reported in errors are relative to `base`, which lets a cursor
/// over a chunk payload report positions in file coordinates.
#[derive(Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    /// Cursor whose error offsets are shifted by `base`.
    pub fn with_base(data: &'a [u8], base: usize) -> Self {
        Self { data, pos: 0, base }
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Absolute offset of the next byte, including the base.
    #[inline]
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Take the next `len` bytes as a borrowed slice.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::TruncatedInput {
                offset: self.offset(),
                needed: len,
                available: self.remaining(),
            });
        }
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Take everything left.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let out = &self.data[self.pos..];
        self.pos = self.data.len();
        out
    }

    /// Skip `len` reserved bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Read a fixed-size byte array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.read_bytes(4)?))
    }

    /// Read a string prefixed by a u16 byte length, no terminator.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    /// Read `count` packed RGBA pixels.
    pub fn read_pixels(&mut self, count: usize) -> Result<Vec<Rgba>> {
        let len = count.checked_mul(Rgba::SIZE).ok_or_else(|| Error::TruncatedInput {
            offset: self.offset(),
            needed: usize::MAX,
            available: self.remaining(),
        })?;
        Ok(Rgba::from_bytes(self.read_bytes(len)?))
    }

    /// Read `count` homogeneous records with `read`.
    pub fn read_vec<T>(
        &mut self,
        count: usize,
        mut read: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        // Cap the preallocation: `count` comes from untrusted input.
        let mut out = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            out.push(read(self)?);
        }
        Ok(out)
    }
}
