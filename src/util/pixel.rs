//! RGBA pixel type shared by the decoder and the compositor.

use bytemuck::{Pod, Zeroable};
use std::fmt;

use super::{Error, Result};

/// One 32-bit RGBA pixel, straight (non-premultiplied) alpha.
///
/// The layout matches the on-disk packing of 32-bit cels, so a pixel plane
/// can be cast from and to bytes without copying.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Size of one packed pixel in bytes.
    pub const SIZE: usize = 4;

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque pixel from colour channels.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xFF)
    }

    /// Apply `f(bg, fg)` to each colour channel, keeping `fg`'s alpha.
    #[inline]
    pub fn zip_rgb(bg: Self, fg: Self, f: impl Fn(u8, u8) -> u8) -> Self {
        Self::new(f(bg.r, fg.r), f(bg.g, fg.g), f(bg.b, fg.b), fg.a)
    }

    /// Transparent plane of `count` pixels.
    ///
    /// Fails with [`Error::UnsupportedFeature`] instead of aborting when the
    /// allocator cannot provide the memory.
    pub fn try_plane(count: usize) -> Result<Vec<Self>> {
        let mut plane = Vec::new();
        plane.try_reserve_exact(count).map_err(|e| {
            Error::unsupported(format!("cannot allocate a {count} pixel plane: {e}"))
        })?;
        plane.resize(count, Self::TRANSPARENT);
        Ok(plane)
    }

    /// Reinterpret packed RGBA bytes as pixels.
    ///
    /// Trailing bytes that do not form a whole pixel are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Vec<Self> {
        let whole = bytes.len() - bytes.len() % Self::SIZE;
        bytemuck::cast_slice(&bytes[..whole]).to_vec()
    }

    /// View a pixel plane as packed RGBA bytes.
    #[inline]
    pub fn as_bytes(pixels: &[Self]) -> &[u8] {
        bytemuck::cast_slice(pixels)
    }
}

impl fmt::Debug for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(p: Rgba) -> Self {
        [p.r, p.g, p.b, p.a]
    }
}
