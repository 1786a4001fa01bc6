//! Frame tag chunk decoding.

use super::cursor::ByteCursor;
use crate::util::Result;

/// Playback direction of a tagged frame range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopDirection {
    Forward,
    Reverse,
    PingPong,
    /// Value this decoder does not name, kept as stored
    Other(u8),
}

impl From<u8> for LoopDirection {
    fn from(v: u8) -> Self {
        match v {
            0 => Self::Forward,
            1 => Self::Reverse,
            2 => Self::PingPong,
            other => Self::Other(other),
        }
    }
}

/// A named sub-range of frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub from: u16,
    pub to: u16,
    pub direction: LoopDirection,
    pub name: String,
}

impl Tag {
    /// Number of frames covered, both ends inclusive.
    pub fn len(&self) -> usize {
        (self.to as usize + 1).saturating_sub(self.from as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decode a frame tags chunk payload.
pub fn read_tags(cur: &mut ByteCursor<'_>) -> Result<Vec<Tag>> {
    let count = cur.read_u16()? as usize;
    cur.skip(8)?;
    cur.read_vec(count, |cur| {
        let from = cur.read_u16()?;
        let to = cur.read_u16()?;
        let direction = LoopDirection::from(cur.read_u8()?);
        // 8 reserved, 3 colour, 1 reserved
        cur.skip(12)?;
        let name = cur.read_string()?;
        Ok(Tag {
            from,
            to,
            direction,
            name,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Error;

    fn tag_record(buf: &mut Vec<u8>, from: u16, to: u16, dir: u8, name: &str) {
        buf.extend_from_slice(&from.to_le_bytes());
        buf.extend_from_slice(&to.to_le_bytes());
        buf.push(dir);
        buf.extend_from_slice(&[0; 8]);
        buf.extend_from_slice(&[0xFF, 0, 0]);
        buf.push(0);
        buf.extend_from_slice(&(name.len() as u16).to_le_bytes());
        buf.extend_from_slice(name.as_bytes());
    }

    #[test]
    fn test_read_tags() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&2u16.to_le_bytes());
        buf.extend_from_slice(&[0; 8]);
        tag_record(&mut buf, 0, 2, 0, "walk");
        tag_record(&mut buf, 3, 4, 2, "jump");

        let mut cur = ByteCursor::new(&buf);
        let tags = read_tags(&mut cur).unwrap();
        assert!(cur.is_empty());
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "walk");
        assert_eq!(tags[0].len(), 3);
        assert_eq!(tags[1].direction, LoopDirection::PingPong);
        assert_eq!((tags[1].from, tags[1].to), (3, 4));
    }

    #[test]
    fn test_truncated_tag_list() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&3u16.to_le_bytes());
        buf.extend_from_slice(&[0; 8]);
        tag_record(&mut buf, 0, 0, 0, "only");
        let err = read_tags(&mut ByteCursor::new(&buf)).unwrap_err();
        assert!(matches!(err, Error::TruncatedInput { .. }));
    }
}
