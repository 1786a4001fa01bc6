//! Low-level Aseprite binary format.
//!
//! ## File Structure
//!
//! ```text
//! +--------------------+
//! | File header        |  128 bytes (magic 0xA5E0)
//! +--------------------+
//! | Frame header       |  16 bytes (magic 0xF1FA, chunk count, duration)
//! |   Chunk            |  size:u32 (header included), type:u16, payload
//! |   Chunk ...        |
//! +--------------------+
//! | Frame header ...   |
//! +--------------------+
//! ```
//!
//! Everything is little-endian with no padding between fields.

mod cel;
mod cursor;
mod format;
mod header;
mod layer;
mod reader;
mod tags;

pub use cel::*;
pub use cursor::*;
pub use format::*;
pub use header::*;
pub use layer::*;
pub use reader::*;
pub use tags::*;
