//! Decompression of compressed cel payloads.
//!
//! Compressed cels store a zlib-wrapped DEFLATE stream of packed pixels.

use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::util::{Error, Result};

/// Inflate a zlib stream, producing at most `limit` bytes.
///
/// Output beyond `limit` is not materialised; the returned buffer is then
/// `limit + 1` bytes long so callers can tell an oversized stream from an
/// exact one.
pub fn decompress(data: &[u8], limit: usize) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data).take(limit as u64 + 1);
    let mut out = Vec::with_capacity(limit.min(16 * 1024 * 1024));
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::DecompressionFailed(e.to_string()))?;
    Ok(out)
}
