//! # aseprite-rgba
//!
//! Decoder for Aseprite (.ase/.aseprite) sprite files that produces one
//! fully composited RGBA raster per animation frame.
//!
//! Only 32-bit RGBA sprites are supported. Indexed and greyscale sprites
//! fail with [`Error::UnsupportedFeature`] as soon as a cel is decoded.
//!
//! ## Modules
//!
//! - [`util`] - Pixel type and errors
//! - [`ase`] - Low-level binary format (cursor, headers, chunks, cels)
//! - [`core`] - Decompression of compressed cels
//! - [`blend`] - Blend modes and canvas compositing
//! - [`sprite`] - Frame assembly and the [`Sprite`] result
//! - [`config`] - [`DecodeOptions`]
//!
//! ## Example
//!
//! ```ignore
//! use aseprite_rgba::Sprite;
//!
//! let sprite = Sprite::open("player.aseprite")?;
//! println!("{}x{}, {} frames", sprite.width(), sprite.height(), sprite.frames().len());
//!
//! for tag in sprite.tags() {
//!     println!("{}: {}..={}", tag.name, tag.from, tag.to);
//! }
//! ```

pub mod ase;
pub mod blend;
pub mod config;
pub mod core;
pub mod sprite;
pub mod util;

// Re-export commonly used types
pub use ase::{Layer, LoopDirection, Tag};
pub use blend::BlendMode;
pub use config::{DecodeOptions, UnknownChunkPolicy, DEFAULT_MAX_PIXELS};
pub use sprite::{decode, decode_with, Frame, Sprite};
pub use util::{Error, Result, Rgba};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::blend::BlendMode;
    pub use crate::config::{DecodeOptions, UnknownChunkPolicy};
    pub use crate::sprite::{decode, decode_with, Frame, Sprite};
    pub use crate::util::{Error, Result, Rgba};
    pub use crate::{Layer, LoopDirection, Tag};
}
