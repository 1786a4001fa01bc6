//! Decode options.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::util::{Error, Result};

/// What to do with a chunk whose type tag the decoder does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownChunkPolicy {
    /// Fail the decode with [`Error::UnsupportedChunk`]
    #[default]
    Abort,
    /// Skip the chunk and log a warning
    Skip,
}

/// Default [`DecodeOptions::max_pixels`]: 2^28 pixels, 1 GiB of RGBA.
pub const DEFAULT_MAX_PIXELS: u64 = 1 << 28;

/// Options controlling a decode call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub unknown_chunks: UnknownChunkPolicy,
    /// Composite frames on the rayon thread pool
    pub parallel: bool,
    /// Upper bound on `width * height * frame_count`, checked before any
    /// frame is allocated
    pub max_pixels: u64,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            unknown_chunks: UnknownChunkPolicy::default(),
            parallel: false,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl DecodeOptions {
    /// Options that skip unknown chunks instead of failing.
    pub fn lenient() -> Self {
        Self {
            unknown_chunks: UnknownChunkPolicy::Skip,
            ..Self::default()
        }
    }

    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> String {
        // Plain struct of enums and bools: serialisation cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
