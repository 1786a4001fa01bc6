//! Error types for the sprite decoder.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for decoding operations.
///
/// Every variant is fatal to the decode call that produced it; there is no
/// partially decoded sprite.
#[derive(Error, Debug)]
pub enum Error {
    /// A record needs more bytes than the buffer has left
    #[error("Truncated input at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Magic number of a file or frame header does not match
    #[error("Bad {what} magic: expected {expected:#06x}, got {found:#06x}")]
    BadMagic {
        what: &'static str,
        expected: u16,
        found: u16,
    },

    /// Chunk type tag is not one the decoder knows
    #[error("Unsupported chunk type {chunk_type:#06x} in frame {frame}")]
    UnsupportedChunk { chunk_type: u16, frame: usize },

    /// Cel payload is malformed
    #[error("Corrupt cel: {0}")]
    CorruptCel(String),

    /// Compressed cel payload could not be inflated
    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),

    /// Valid file using something this decoder does not handle
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// Structural violation outside of cel payloads
    #[error("Invalid file structure: {0}")]
    InvalidStructure(String),

    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Decode options could not be parsed
    #[error("Invalid decode options: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Create a corrupt cel error.
    pub fn corrupt_cel(msg: impl Into<String>) -> Self {
        Self::CorruptCel(msg.into())
    }

    /// Create an unsupported feature error.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedFeature(msg.into())
    }

    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }
}

/// Result type alias for decoding operations.
pub type Result<T> = std::result::Result<T, Error>;
