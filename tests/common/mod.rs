//! Writer for synthesized Aseprite buffers used by the integration tests.

#![allow(dead_code)]

use std::io::Write;

use aseprite_rgba::Rgba;
use flate2::write::ZlibEncoder;
use flate2::Compression;

pub const LAYER: u16 = 0x2004;
pub const CEL: u16 = 0x2005;
pub const FRAME_TAGS: u16 = 0x2018;
pub const PALETTE: u16 = 0x2019;
pub const USER_DATA: u16 = 0x2020;

/// A chunk as (type tag, payload).
pub type ChunkSpec = (u16, Vec<u8>);

/// A frame as (duration, chunks).
pub type FrameSpec = (u16, Vec<ChunkSpec>);

pub fn sprite(width: u16, height: u16, frames: &[FrameSpec]) -> Vec<u8> {
    sprite_with_depth(width, height, 32, frames)
}

pub fn sprite_with_depth(width: u16, height: u16, depth: u16, frames: &[FrameSpec]) -> Vec<u8> {
    let mut body = Vec::new();
    for (duration, chunks) in frames {
        let mut data = Vec::new();
        for (ty, payload) in chunks {
            data.extend_from_slice(&((payload.len() + 6) as u32).to_le_bytes());
            data.extend_from_slice(&ty.to_le_bytes());
            data.extend_from_slice(payload);
        }
        body.extend_from_slice(&((data.len() + 16) as u32).to_le_bytes());
        body.extend_from_slice(&0xF1FAu16.to_le_bytes());
        body.extend_from_slice(&(chunks.len() as u16).to_le_bytes());
        body.extend_from_slice(&duration.to_le_bytes());
        body.extend_from_slice(&[0; 6]);
        body.extend_from_slice(&data);
    }

    let mut buf = vec![0u8; 128];
    buf[0..4].copy_from_slice(&((128 + body.len()) as u32).to_le_bytes());
    buf[4..6].copy_from_slice(&0xA5E0u16.to_le_bytes());
    buf[6..8].copy_from_slice(&(frames.len() as u16).to_le_bytes());
    buf[8..10].copy_from_slice(&width.to_le_bytes());
    buf[10..12].copy_from_slice(&height.to_le_bytes());
    buf[12..14].copy_from_slice(&depth.to_le_bytes());
    buf[18..20].copy_from_slice(&100u16.to_le_bytes());
    buf[32..34].copy_from_slice(&256u16.to_le_bytes());
    buf.extend_from_slice(&body);
    buf
}

pub fn layer(name: &str, blend_mode: u16, opacity: u8) -> ChunkSpec {
    let mut buf = Vec::new();
    buf.extend_from_slice(&1u16.to_le_bytes()); // visible
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&[0; 4]);
    buf.extend_from_slice(&blend_mode.to_le_bytes());
    buf.push(opacity);
    buf.extend_from_slice(&[0; 3]);
    push_string(&mut buf, name);
    (LAYER, buf)
}

fn cel_header(layer: u16, x: i16, y: i16, opacity: u8, kind: u16) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&layer.to_le_bytes());
    buf.extend_from_slice(&x.to_le_bytes());
    buf.extend_from_slice(&y.to_le_bytes());
    buf.push(opacity);
    buf.extend_from_slice(&kind.to_le_bytes());
    buf.extend_from_slice(&[0; 7]);
    buf
}

pub fn raw_cel(layer: u16, x: i16, y: i16, width: u16, height: u16, pixels: &[Rgba]) -> ChunkSpec {
    assert_eq!(pixels.len(), width as usize * height as usize);
    let mut buf = cel_header(layer, x, y, 0xFF, 0);
    buf.extend_from_slice(&width.to_le_bytes());
    buf.extend_from_slice(&height.to_le_bytes());
    buf.extend_from_slice(Rgba::as_bytes(pixels));
    (CEL, buf)
}

pub fn compressed_cel(
    layer: u16,
    x: i16,
    y: i16,
    width: u16,
    height: u16,
    pixels: &[Rgba],
) -> ChunkSpec {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(Rgba::as_bytes(pixels)).unwrap();
    let mut buf = cel_header(layer, x, y, 0xFF, 2);
    buf.extend_from_slice(&width.to_le_bytes());
    buf.extend_from_slice(&height.to_le_bytes());
    buf.extend_from_slice(&enc.finish().unwrap());
    (CEL, buf)
}

pub fn linked_cel(layer: u16, x: i16, y: i16, link: u16) -> ChunkSpec {
    let mut buf = cel_header(layer, x, y, 0xFF, 1);
    buf.extend_from_slice(&link.to_le_bytes());
    (CEL, buf)
}

pub fn tags(tags: &[(u16, u16, u8, &str)]) -> ChunkSpec {
    let mut buf = Vec::new();
    buf.extend_from_slice(&(tags.len() as u16).to_le_bytes());
    buf.extend_from_slice(&[0; 8]);
    for &(from, to, dir, name) in tags {
        buf.extend_from_slice(&from.to_le_bytes());
        buf.extend_from_slice(&to.to_le_bytes());
        buf.push(dir);
        buf.extend_from_slice(&[0; 8]);
        buf.extend_from_slice(&[0x10, 0x20, 0x30]);
        buf.push(0);
        push_string(&mut buf, name);
    }
    (FRAME_TAGS, buf)
}

fn push_string(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u16).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

/// Solid plane of `n` pixels.
pub fn fill(n: usize, px: Rgba) -> Vec<Rgba> {
    vec![px; n]
}

/// Deterministic opaque gradient of `n` pixels.
pub fn gradient(n: usize, seed: u8) -> Vec<Rgba> {
    (0..n)
        .map(|i| Rgba::opaque(seed, (i % 251) as u8, (i / 251 % 256) as u8))
        .collect()
}
