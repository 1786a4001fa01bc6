//! Layer chunk decoding.

use super::cursor::ByteCursor;
use crate::blend::BlendMode;
use crate::util::{Error, Result};

/// Layer flag bits.
pub mod flags {
    pub const VISIBLE: u16 = 1;
    pub const EDITABLE: u16 = 2;
    pub const LOCK_MOVEMENT: u16 = 4;
    pub const BACKGROUND: u16 = 8;
}

/// A named compositing channel shared by all frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    pub flags: u16,
    /// 0 = image layer, 1 = group
    pub layer_type: u16,
    /// Nesting depth under group layers
    pub child_level: u16,
    pub blend_mode: BlendMode,
    pub opacity: u8,
    pub name: String,
}

impl Layer {
    /// Decode a layer chunk payload.
    pub fn read(cur: &mut ByteCursor<'_>) -> Result<Self> {
        let flags = cur.read_u16()?;
        let layer_type = cur.read_u16()?;
        let child_level = cur.read_u16()?;
        cur.skip(4)?;
        let mode = cur.read_u16()?;
        let blend_mode = BlendMode::from_u16(mode)
            .ok_or_else(|| Error::unsupported(format!("layer blend mode {mode}")))?;
        let opacity = cur.read_u8()?;
        cur.skip(3)?;
        let name = cur.read_string()?;

        Ok(Self {
            flags,
            layer_type,
            child_level,
            blend_mode,
            opacity,
            name,
        })
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.flags & flags::VISIBLE != 0
    }

    #[inline]
    pub fn is_group(&self) -> bool {
        self.layer_type == 1
    }
}
