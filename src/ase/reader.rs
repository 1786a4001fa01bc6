//! Container parser: file header, frame headers and raw chunks.

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

#[cfg(feature = "mmap")]
use memmap2::Mmap;
use tracing::debug;

use super::cursor::ByteCursor;
use super::format::*;
use super::header::{Chunk, FileHeader, FrameHeader};
use crate::util::{Error, Result};

/// A frame's header and its undecoded chunks.
#[derive(Clone, Debug)]
pub struct RawFrame<'a> {
    pub header: FrameHeader,
    pub chunks: Vec<Chunk<'a>>,
}

/// The whole container split into frames and chunks, payloads borrowed.
#[derive(Clone, Debug)]
pub struct RawSprite<'a> {
    pub header: FileHeader,
    pub frames: Vec<RawFrame<'a>>,
}

impl<'a> RawSprite<'a> {
    /// Walk the file header and every frame's chunk list.
    ///
    /// Buffers of 128 bytes or less cannot hold a sprite and fail with
    /// [`Error::TruncatedInput`].
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        if data.len() <= FILE_HEADER_SIZE {
            return Err(Error::TruncatedInput {
                offset: 0,
                needed: FILE_HEADER_SIZE + 1,
                available: data.len(),
            });
        }

        let mut cur = ByteCursor::new(data);
        let header = FileHeader::read(&mut cur)?;
        debug!(
            frames = header.frame_count,
            width = header.width,
            height = header.height,
            depth = header.depth,
            "file header"
        );

        let frame_count = header.frame_count as usize;
        let mut frames = Vec::with_capacity(frame_count.min(cur.remaining() / FRAME_HEADER_SIZE));
        for index in 0..frame_count {
            let frame_header = FrameHeader::read(&mut cur)?;
            if frame_header.duration == 0 {
                return Err(Error::invalid(format!("frame {index} has zero duration")));
            }
            let chunks = cur.read_vec(frame_header.chunk_count as usize, Chunk::read)?;
            debug!(
                frame = index,
                chunks = chunks.len(),
                duration = frame_header.duration,
                "frame"
            );
            frames.push(RawFrame {
                header: frame_header,
                chunks,
            });
        }

        Ok(Self { header, frames })
    }
}

/// File contents, memory-mapped when the `mmap` feature is enabled.
pub enum FileData {
    #[cfg(feature = "mmap")]
    Mmap(Mmap),
    Bytes(Vec<u8>),
}

impl Deref for FileData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            #[cfg(feature = "mmap")]
            Self::Mmap(mmap) => mmap,
            Self::Bytes(bytes) => bytes,
        }
    }
}

/// Read a sprite file into memory.
pub fn read_file(path: impl AsRef<Path>) -> Result<FileData> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::Io(e)
        }
    })?;

    let size = file.metadata()?.len() as usize;
    if size <= FILE_HEADER_SIZE {
        return Err(Error::TruncatedInput {
            offset: 0,
            needed: FILE_HEADER_SIZE + 1,
            available: size,
        });
    }

    #[cfg(feature = "mmap")]
    {
        // Safety: the map is read-only and lives no longer than this decode.
        let mmap = unsafe { Mmap::map(&file) }?;
        Ok(FileData::Mmap(mmap))
    }
    #[cfg(not(feature = "mmap"))]
    {
        use std::io::Read;
        let mut bytes = Vec::with_capacity(size);
        let mut file = file;
        file.read_to_end(&mut bytes)?;
        Ok(FileData::Bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(frames: u16) -> Vec<u8> {
        let mut buf = vec![0u8; FILE_HEADER_SIZE];
        buf[4..6].copy_from_slice(&FILE_MAGIC.to_le_bytes());
        buf[6..8].copy_from_slice(&frames.to_le_bytes());
        buf[8..10].copy_from_slice(&2u16.to_le_bytes());
        buf[10..12].copy_from_slice(&2u16.to_le_bytes());
        buf[12..14].copy_from_slice(&32u16.to_le_bytes());
        buf
    }

    fn frame(buf: &mut Vec<u8>, chunks: &[(u16, &[u8])], duration: u16) {
        let body: usize = chunks.iter().map(|(_, d)| d.len() + CHUNK_HEADER_SIZE).sum();
        buf.extend_from_slice(&((FRAME_HEADER_SIZE + body) as u32).to_le_bytes());
        buf.extend_from_slice(&FRAME_MAGIC.to_le_bytes());
        buf.extend_from_slice(&(chunks.len() as u16).to_le_bytes());
        buf.extend_from_slice(&duration.to_le_bytes());
        buf.extend_from_slice(&[0; 6]);
        for (ty, data) in chunks {
            buf.extend_from_slice(&((data.len() + CHUNK_HEADER_SIZE) as u32).to_le_bytes());
            buf.extend_from_slice(&ty.to_le_bytes());
            buf.extend_from_slice(data);
        }
    }

    #[test]
    fn test_parse_frames_and_chunks() {
        let mut buf = header(2);
        frame(&mut buf, &[(0x2019, &[1, 2, 3]), (0x2016, &[])], 100);
        frame(&mut buf, &[(0x1234, &[9])], 50);

        let raw = RawSprite::parse(&buf).unwrap();
        assert_eq!(raw.frames.len(), 2);
        assert_eq!(raw.frames[0].chunks.len(), 2);
        assert_eq!(raw.frames[0].chunks[0].chunk_type, ChunkType::Palette);
        assert_eq!(raw.frames[0].chunks[0].data, &[1, 2, 3]);
        assert_eq!(raw.frames[0].chunks[0].offset, FILE_HEADER_SIZE + FRAME_HEADER_SIZE + CHUNK_HEADER_SIZE);
        assert_eq!(raw.frames[1].header.duration, 50);
        // Unknown chunks are retained raw.
        assert_eq!(raw.frames[1].chunks[0].chunk_type, ChunkType::Unknown(0x1234));
    }

    #[test]
    fn test_too_short() {
        for len in [0, 10, FILE_HEADER_SIZE] {
            let buf = vec![0u8; len];
            assert!(matches!(
                RawSprite::parse(&buf),
                Err(Error::TruncatedInput { .. })
            ));
        }
    }

    #[test]
    fn test_missing_frames() {
        let mut buf = header(3);
        frame(&mut buf, &[], 100);
        assert!(matches!(
            RawSprite::parse(&buf),
            Err(Error::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_chunk_overruns_buffer() {
        let mut buf = header(1);
        frame(&mut buf, &[(0x2019, &[0; 8])], 100);
        buf.truncate(buf.len() - 3);
        assert!(matches!(
            RawSprite::parse(&buf),
            Err(Error::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_bad_frame_magic_and_duration() {
        let mut buf = header(1);
        frame(&mut buf, &[], 100);
        buf[FILE_HEADER_SIZE + 4] = 0;
        assert!(matches!(
            RawSprite::parse(&buf),
            Err(Error::BadMagic { what: "frame", .. })
        ));

        let mut buf = header(1);
        frame(&mut buf, &[], 0);
        assert!(matches!(
            RawSprite::parse(&buf),
            Err(Error::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.ase");
        std::fs::write(&path, [0u8; 64]).unwrap();
        assert!(matches!(read_file(&path), Err(Error::TruncatedInput { .. })));

        let mut buf = header(1);
        frame(&mut buf, &[], 100);
        std::fs::write(&path, &buf).unwrap();
        let data = read_file(&path).unwrap();
        assert_eq!(&data[..], &buf[..]);

        assert!(matches!(
            read_file(dir.path().join("nope.ase")),
            Err(Error::FileNotFound(_))
        ));
    }
}
