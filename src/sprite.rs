//! Sprite assembly: decode every frame and composite its cels.
//!
//! Decoding runs in two passes. The first walks all frames in order,
//! collecting layer and tag metadata and each frame's cel chunks. The
//! second decodes and composites frames independently, optionally on the
//! rayon thread pool; a frame only sees the layers declared up to and
//! including itself, as a sequential decode would.

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::ase::{
    read_file, read_tags, resolve_links, Cel, Chunk, ChunkType, FileHeader, Layer, RawSprite, Tag,
};
use crate::blend::{mul_un8, take_foreground, BlendFn, Canvas};
use crate::config::{DecodeOptions, UnknownChunkPolicy};
use crate::util::{Error, Result, Rgba};

/// One composited animation frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Duration in milliseconds
    pub duration: u16,
    /// Row-major, `width * height` pixels
    pub pixels: Vec<Rgba>,
}

impl Frame {
    fn blank(duration: u16, pixel_count: usize) -> Result<Self> {
        Ok(Self {
            duration,
            pixels: Rgba::try_plane(pixel_count)?,
        })
    }

    /// Pixels as packed RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        Rgba::as_bytes(&self.pixels)
    }
}

/// A decoded animation.
#[derive(Clone, Debug)]
pub struct Sprite {
    width: u16,
    height: u16,
    tags: Vec<Tag>,
    layers: Vec<Layer>,
    frames: Vec<Frame>,
}

impl Sprite {
    /// Load and decode a sprite file with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &DecodeOptions::default())
    }

    /// Load and decode a sprite file.
    pub fn open_with(path: impl AsRef<Path>, opts: &DecodeOptions) -> Result<Self> {
        let data = read_file(path)?;
        decode_with(&data, opts)
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    #[inline]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Layers in file order.
    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Total animation length in milliseconds.
    pub fn duration(&self) -> u32 {
        self.frames.iter().map(|f| f.duration as u32).sum()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

/// Decode a sprite from an in-memory buffer with default options.
pub fn decode(data: &[u8]) -> Result<Sprite> {
    decode_with(data, &DecodeOptions::default())
}

/// Work for one frame, gathered by the sequential pass.
struct FrameJob<'a> {
    index: usize,
    duration: u16,
    cels: Vec<Chunk<'a>>,
    /// Layers declared up to and including this frame
    layer_count: usize,
}

/// Decode a sprite from an in-memory buffer.
#[tracing::instrument(skip_all, fields(len = data.len()))]
pub fn decode_with(data: &[u8], opts: &DecodeOptions) -> Result<Sprite> {
    let raw = RawSprite::parse(data)?;
    let header = &raw.header;

    let total_pixels = header.width as u64 * header.height as u64 * header.frame_count as u64;
    if total_pixels > opts.max_pixels {
        return Err(Error::unsupported(format!(
            "{}x{} sprite with {} frames needs {} pixels, limit is {}",
            header.width, header.height, header.frame_count, total_pixels, opts.max_pixels
        )));
    }

    let mut layers: Vec<Layer> = Vec::new();
    let mut tags: Option<Vec<Tag>> = None;
    let mut jobs = Vec::with_capacity(raw.frames.len());

    for (index, frame) in raw.frames.iter().enumerate() {
        let mut cels = Vec::new();
        for chunk in &frame.chunks {
            match chunk.chunk_type {
                ChunkType::Cel => cels.push(chunk.clone()),
                ChunkType::Layer => {
                    let layer = Layer::read(&mut chunk.cursor())?;
                    if !layer.blend_mode.is_implemented() {
                        warn!(
                            layer = %layer.name,
                            mode = ?layer.blend_mode,
                            "blend mode not implemented, compositing as normal"
                        );
                    }
                    layers.push(layer);
                }
                ChunkType::FrameTags => {
                    if tags.is_some() {
                        return Err(Error::unsupported(format!(
                            "second frame tags chunk in frame {index}"
                        )));
                    }
                    tags = Some(read_tags(&mut chunk.cursor())?);
                }
                ChunkType::Unknown(tag) => match opts.unknown_chunks {
                    UnknownChunkPolicy::Abort => {
                        return Err(Error::UnsupportedChunk {
                            chunk_type: tag,
                            frame: index,
                        });
                    }
                    UnknownChunkPolicy::Skip => {
                        warn!(frame = index, chunk_type = tag, size = chunk.size, "skipping unknown chunk");
                    }
                },
                ignored => debug!(frame = index, chunk = ?ignored, "ignoring chunk"),
            }
        }
        jobs.push(FrameJob {
            index,
            duration: frame.header.duration,
            cels,
            layer_count: layers.len(),
        });
    }

    let tags = tags.unwrap_or_default();
    for tag in &tags {
        if tag.from > tag.to || tag.to >= header.frame_count {
            return Err(Error::invalid(format!(
                "tag '{}' covers frames {}..={} of {}",
                tag.name, tag.from, tag.to, header.frame_count
            )));
        }
    }

    let render = |job: &FrameJob<'_>| render_frame(job, header, &layers[..job.layer_count]);
    let frames = if opts.parallel {
        jobs.par_iter().map(render).collect::<Result<Vec<_>>>()?
    } else {
        jobs.iter().map(render).collect::<Result<Vec<_>>>()?
    };

    debug!(
        frames = frames.len(),
        layers = layers.len(),
        tags = tags.len(),
        "sprite decoded"
    );
    Ok(Sprite {
        width: header.width,
        height: header.height,
        tags,
        layers,
        frames,
    })
}

/// Decode one frame's cels and composite them onto a blank canvas.
///
/// Cels are applied in reverse decode order. Without layer metadata every
/// cel paints over the canvas at full opacity.
fn render_frame(job: &FrameJob<'_>, header: &FileHeader, layers: &[Layer]) -> Result<Frame> {
    let mut cels = job
        .cels
        .iter()
        .map(|chunk| Cel::read(chunk, header.depth))
        .collect::<Result<Vec<_>>>()?;
    resolve_links(&mut cels)?;

    if cels.is_empty() {
        return Frame::blank(job.duration, header.pixel_count());
    }

    let mut canvas = Canvas::new(header.width as usize, header.height as usize)?;
    for cel in cels.iter().rev() {
        let (blend, opacity): (BlendFn, u8) = if layers.is_empty() {
            (take_foreground, 0xFF)
        } else {
            let layer = layers.get(cel.layer_index as usize).ok_or_else(|| {
                Error::unsupported(format!(
                    "cel in frame {} references layer {} of {}",
                    job.index,
                    cel.layer_index,
                    layers.len()
                ))
            })?;
            (layer.blend_mode.blend_fn(), mul_un8(cel.opacity, layer.opacity))
        };
        canvas.composite(&cel.plane(), opacity, blend);
    }

    Ok(Frame {
        duration: job.duration,
        pixels: canvas.into_pixels(),
    })
}
