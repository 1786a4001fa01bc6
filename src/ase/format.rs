//! Aseprite format constants and chunk type tags.

/// Magic number in the file header.
pub const FILE_MAGIC: u16 = 0xA5E0;

/// Magic number in every frame header.
pub const FRAME_MAGIC: u16 = 0xF1FA;

/// Size of the file header in bytes.
pub const FILE_HEADER_SIZE: usize = 128;

/// Size of a frame header in bytes.
pub const FRAME_HEADER_SIZE: usize = 16;

/// Size of a chunk header (size + type) in bytes.
pub const CHUNK_HEADER_SIZE: usize = 6;

/// Size of the fixed part of a cel chunk.
pub const CEL_HEADER_SIZE: usize = 16;

/// Size of the fixed part of a layer chunk.
pub const LAYER_HEADER_SIZE: usize = 16;

/// Size of the tag list sub-header.
pub const TAGS_HEADER_SIZE: usize = 10;

/// Size of the fixed part of one tag record (name follows).
pub const TAG_RECORD_SIZE: usize = 17;

/// The only colour depth this decoder composites.
pub const RGBA_DEPTH: u16 = 32;

/// Chunk type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChunkType {
    /// Legacy 256-entry palette
    OldPalette,
    /// Legacy 64-level palette
    OldPalette2,
    Layer,
    Cel,
    Mask,
    Path,
    FrameTags,
    Palette,
    UserData,
    /// Anything else, kept raw
    Unknown(u16),
}

impl ChunkType {
    /// Map a raw tag to a chunk type.
    pub const fn from_u16(tag: u16) -> Self {
        match tag {
            0x0004 => Self::OldPalette,
            0x0011 => Self::OldPalette2,
            0x2004 => Self::Layer,
            0x2005 => Self::Cel,
            0x2016 => Self::Mask,
            0x2017 => Self::Path,
            0x2018 => Self::FrameTags,
            0x2019 => Self::Palette,
            0x2020 => Self::UserData,
            other => Self::Unknown(other),
        }
    }

    /// Raw tag as stored in the file.
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::OldPalette => 0x0004,
            Self::OldPalette2 => 0x0011,
            Self::Layer => 0x2004,
            Self::Cel => 0x2005,
            Self::Mask => 0x2016,
            Self::Path => 0x2017,
            Self::FrameTags => 0x2018,
            Self::Palette => 0x2019,
            Self::UserData => 0x2020,
            Self::Unknown(tag) => tag,
        }
    }

    /// Chunks that are recognised but carry nothing the compositor needs.
    pub const fn is_ignored(self) -> bool {
        matches!(
            self,
            Self::OldPalette
                | Self::OldPalette2
                | Self::Mask
                | Self::Path
                | Self::Palette
                | Self::UserData
        )
    }
}
