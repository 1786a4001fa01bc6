//! Core collaborators of the decoder.
//!
//! - [`decompress`] - zlib inflate for compressed cels

mod compression;

pub use compression::decompress;
