//! Cel chunk decoding and same-frame link resolution.

use tracing::trace;

use super::cursor::ByteCursor;
use super::format::{CEL_HEADER_SIZE, RGBA_DEPTH};
use super::header::Chunk;
use crate::blend::CelPlane;
use crate::core::decompress;
use crate::util::{Error, Result, Rgba};

/// How a cel stores its pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CelKind {
    Raw,
    Linked,
    Compressed,
}

impl CelKind {
    pub const fn from_u16(v: u16) -> Option<Self> {
        match v {
            0 => Some(Self::Raw),
            1 => Some(Self::Linked),
            2 => Some(Self::Compressed),
            _ => None,
        }
    }
}

/// One layer's contribution to one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cel {
    pub layer_index: u16,
    pub x: i16,
    pub y: i16,
    pub opacity: u8,
    pub kind: CelKind,
    pub width: u16,
    pub height: u16,
    /// Index of the referenced cel for [`CelKind::Linked`]
    pub link: Option<u16>,
    /// Empty for a linked cel until [`resolve_links`] copies the target's
    pub pixels: Vec<Rgba>,
}

impl Cel {
    /// Decode a cel chunk. Only 32-bit RGBA sprites are supported.
    pub fn read(chunk: &Chunk<'_>, depth: u16) -> Result<Self> {
        if depth != RGBA_DEPTH {
            return Err(Error::unsupported(format!(
                "{depth}-bit colour depth (only {RGBA_DEPTH}-bit RGBA)"
            )));
        }
        if chunk.data.len() < CEL_HEADER_SIZE {
            return Err(Error::corrupt_cel(format!(
                "payload of {} bytes at offset {} is shorter than the cel header",
                chunk.data.len(),
                chunk.offset
            )));
        }

        let mut cur = chunk.cursor();
        let layer_index = cur.read_u16()?;
        let x = cur.read_i16()?;
        let y = cur.read_i16()?;
        let opacity = cur.read_u8()?;
        let raw_kind = cur.read_u16()?;
        cur.skip(7)?;

        let kind = CelKind::from_u16(raw_kind)
            .ok_or_else(|| Error::corrupt_cel(format!("unknown cel type {raw_kind}")))?;

        let mut cel = Cel {
            layer_index,
            x,
            y,
            opacity,
            kind,
            width: 0,
            height: 0,
            link: None,
            pixels: Vec::new(),
        };

        match kind {
            CelKind::Raw => {
                cel.read_size(&mut cur)?;
                let needed = cel.pixel_count() * Rgba::SIZE;
                if cur.remaining() != needed {
                    return Err(Error::corrupt_cel(format!(
                        "raw {}x{} cel needs {} pixel bytes, chunk holds {}",
                        cel.width,
                        cel.height,
                        needed,
                        cur.remaining()
                    )));
                }
                cel.pixels = cur.read_pixels(cel.pixel_count())?;
            }
            CelKind::Linked => {
                let link = cur.read_u16().map_err(|_| Error::corrupt_cel("linked cel without link index"))?;
                if !cur.is_empty() {
                    return Err(Error::corrupt_cel(format!(
                        "{} trailing bytes after linked cel",
                        cur.remaining()
                    )));
                }
                cel.link = Some(link);
            }
            CelKind::Compressed => {
                cel.read_size(&mut cur)?;
                let expected = cel.pixel_count() * Rgba::SIZE;
                let inflated = decompress(cur.read_rest(), expected)?;
                if inflated.len() != expected {
                    return Err(Error::corrupt_cel(format!(
                        "compressed {}x{} cel inflates to {} bytes, expected {}",
                        cel.width,
                        cel.height,
                        inflated.len(),
                        expected
                    )));
                }
                cel.pixels = Rgba::from_bytes(&inflated);
            }
        }

        trace!(
            layer = cel.layer_index,
            x = cel.x,
            y = cel.y,
            kind = ?cel.kind,
            width = cel.width,
            height = cel.height,
            "decoded cel"
        );
        Ok(cel)
    }

    fn read_size(&mut self, cur: &mut ByteCursor<'_>) -> Result<()> {
        let short = |_| Error::corrupt_cel("cel header ends before width/height");
        self.width = cur.read_u16().map_err(short)?;
        self.height = cur.read_u16().map_err(short)?;
        Ok(())
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Borrow this cel as a plane for the compositor.
    pub fn plane(&self) -> CelPlane<'_> {
        CelPlane {
            x: self.x as i32,
            y: self.y as i32,
            width: self.width as usize,
            height: self.height as usize,
            pixels: &self.pixels,
        }
    }
}

/// Replace every linked cel's pixels with a copy of its target's.
///
/// A link must point at an earlier, non-linked cel of the same layer in the
/// same frame. Anything else (in practice, a link into another frame) is
/// reported as unsupported.
pub fn resolve_links(cels: &mut [Cel]) -> Result<()> {
    for i in 0..cels.len() {
        let Some(link) = cels[i].link else { continue };
        let target = link as usize;
        let resolvable = target < i
            && cels[target].kind != CelKind::Linked
            && cels[target].layer_index == cels[i].layer_index;
        if !resolvable {
            return Err(Error::unsupported(format!(
                "linked cel on layer {} references cel {} outside the current frame",
                cels[i].layer_index, link
            )));
        }
        let (width, height, pixels) = {
            let t = &cels[target];
            (t.width, t.height, t.pixels.clone())
        };
        let cel = &mut cels[i];
        cel.width = width;
        cel.height = height;
        cel.pixels = pixels;
    }
    Ok(())
}
