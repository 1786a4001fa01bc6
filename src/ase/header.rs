//! Fixed-size file and frame headers, and raw chunk records.

use super::cursor::ByteCursor;
use super::format::*;
use crate::util::{Error, Result};

/// The 128-byte file header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub file_size: u32,
    pub frame_count: u16,
    pub width: u16,
    pub height: u16,
    /// Bits per pixel: 32 (RGBA), 16 (greyscale) or 8 (indexed)
    pub depth: u16,
    pub flags: u32,
    /// Deprecated global frame duration in milliseconds
    pub speed: u16,
    pub transparent_index: u8,
    pub color_count: u16,
}

impl FileHeader {
    /// Decode and validate the file header.
    ///
    /// Fails with [`Error::BadMagic`] when the magic number is wrong.
    pub fn read(cur: &mut ByteCursor<'_>) -> Result<Self> {
        let start = cur.position();
        let file_size = cur.read_u32()?;
        let magic = cur.read_u16()?;
        if magic != FILE_MAGIC {
            return Err(Error::BadMagic {
                what: "file",
                expected: FILE_MAGIC,
                found: magic,
            });
        }
        let frame_count = cur.read_u16()?;
        let width = cur.read_u16()?;
        let height = cur.read_u16()?;
        let depth = cur.read_u16()?;
        let flags = cur.read_u32()?;
        let speed = cur.read_u16()?;
        cur.skip(8)?;
        let transparent_index = cur.read_u8()?;
        cur.skip(3)?;
        let color_count = cur.read_u16()?;
        cur.skip(FILE_HEADER_SIZE - (cur.position() - start))?;

        Ok(Self {
            file_size,
            frame_count,
            width,
            height,
            depth,
            flags,
            speed,
            transparent_index,
            color_count,
        })
    }

    /// Number of pixels in one frame raster.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// The 16-byte header preceding each frame's chunks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    /// Frame size in bytes, header included
    pub size: u32,
    pub chunk_count: u16,
    /// Frame duration in milliseconds
    pub duration: u16,
}

impl FrameHeader {
    pub fn read(cur: &mut ByteCursor<'_>) -> Result<Self> {
        let size = cur.read_u32()?;
        let magic = cur.read_u16()?;
        if magic != FRAME_MAGIC {
            return Err(Error::BadMagic {
                what: "frame",
                expected: FRAME_MAGIC,
                found: magic,
            });
        }
        let chunk_count = cur.read_u16()?;
        let duration = cur.read_u16()?;
        cur.skip(6)?;
        Ok(Self {
            size,
            chunk_count,
            duration,
        })
    }
}

/// One length-delimited record inside a frame, payload not interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Declared size, chunk header included
    pub size: u32,
    pub chunk_type: ChunkType,
    /// File offset of the payload
    pub offset: usize,
    pub data: &'a [u8],
}

impl<'a> Chunk<'a> {
    pub fn read(cur: &mut ByteCursor<'a>) -> Result<Self> {
        let size = cur.read_u32()?;
        let chunk_type = ChunkType::from_u16(cur.read_u16()?);
        let payload_len = (size as usize)
            .checked_sub(CHUNK_HEADER_SIZE)
            .ok_or_else(|| {
                Error::invalid(format!(
                    "chunk {:#06x} declares size {} below its {}-byte header",
                    chunk_type.to_u16(),
                    size,
                    CHUNK_HEADER_SIZE
                ))
            })?;
        let offset = cur.offset();
        let data = cur.read_bytes(payload_len)?;
        Ok(Self {
            size,
            chunk_type,
            offset,
            data,
        })
    }

    /// Cursor over the payload reporting file offsets.
    pub fn cursor(&self) -> ByteCursor<'a> {
        ByteCursor::with_base(self.data, self.offset)
    }
}
