//! Canvas compositing of offset cel planes.

use super::BlendFn;
use crate::util::{Result, Rgba};

/// A borrowed pixel plane placed at a signed offset on the canvas.
#[derive(Clone, Copy, Debug)]
pub struct CelPlane<'a> {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
    /// Row-major, `width * height` pixels
    pub pixels: &'a [Rgba],
}

/// Frame-sized RGBA plane that cels are composited onto.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Canvas {
    /// Fully transparent canvas.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            width,
            height,
            pixels: Rgba::try_plane(width * height)?,
        })
    }

    /// Wrap existing pixels. Returns `None` if the length does not match.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgba>) -> Option<Self> {
        (pixels.len() == width * height).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Rgba> {
        self.pixels
    }

    /// Pixel at `(x, y)`, if inside the canvas.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Blend `cel` onto the canvas.
    ///
    /// Each canvas pixel covered by the cel rectangle becomes
    /// `blend(canvas_pixel, cel_pixel, opacity)`; all others are untouched.
    /// Parts of the cel outside the canvas are clipped.
    pub fn composite(&mut self, cel: &CelPlane<'_>, opacity: u8, blend: BlendFn) {
        if cel.width == 0 || self.width == 0 {
            return;
        }
        let (cw, ch) = (self.width as i64, self.height as i64);
        let (x, y) = (cel.x as i64, cel.y as i64);

        // Cel columns that land on the canvas.
        let col_start = (-x).clamp(0, cel.width as i64) as usize;
        let col_end = (cw - x).clamp(0, cel.width as i64) as usize;
        if col_start >= col_end {
            return;
        }

        for (row, src) in cel.pixels.chunks_exact(cel.width).take(cel.height).enumerate() {
            let dy = y + row as i64;
            if dy < 0 {
                continue;
            }
            if dy >= ch {
                break;
            }
            let dst_start = dy as usize * self.width + (x + col_start as i64) as usize;
            let dst = &mut self.pixels[dst_start..dst_start + (col_end - col_start)];
            for (d, &s) in dst.iter_mut().zip(&src[col_start..col_end]) {
                *d = blend(*d, s, opacity);
            }
        }
    }
}
