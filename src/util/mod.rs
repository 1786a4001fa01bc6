//! Utility types shared across the decoder.
//!
//! - [`Rgba`] - 32-bit pixel
//! - [`Error`] / [`Result`] - Error handling

mod error;
mod pixel;

pub use error::*;
pub use pixel::*;
