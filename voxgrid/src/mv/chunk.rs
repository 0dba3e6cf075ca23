//! Reading of the individual chunk records which make up a `.vox` file.
//!
//! A chunk is laid out as:
//!
//! ```text
//! ┌────────┬──────────────┬───────────────┬─────────────────┬──────────────────┐
//! │ id (4) │ content (u32)│ children (u32)│ content bytes … │ children bytes … │
//! └────────┴──────────────┴───────────────┴─────────────────┴──────────────────┘
//! ```
//!
//! with both lengths little-endian. The children are themselves chunks, but the reader
//! never needs to interpret them in order to skip past them.

use core::fmt;
use std::io::{self, Read, Seek};

use byteorder::{LittleEndian, ReadBytesExt as _};

use crate::mv::DotVoxParseError;

// -------------------------------------------------------------------------------------------------

/// Four-byte identifier of a chunk, such as `MAIN` or `XYZI`.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct ChunkId(pub [u8; 4]);

impl ChunkId {
    /// Root chunk containing all other chunks.
    pub const MAIN: Self = Self(*b"MAIN");
    /// Model dimensions.
    pub const SIZE: Self = Self(*b"SIZE");
    /// Model voxels.
    pub const XYZI: Self = Self(*b"XYZI");
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId({self})")
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Identifiers are conventionally ASCII, but nothing stops a file from containing
        // arbitrary bytes there.
        write!(f, "'{}'", self.0.escape_ascii())
    }
}

/// A chunk whose content has been read, but whose children have not.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct Chunk {
    /// Identifier of the chunk.
    pub id: ChunkId,
    /// The complete content bytes.
    pub content: Vec<u8>,
    /// Absolute stream offset just past this chunk's children.
    ///
    /// The caller either reads the children (which start at the current stream position)
    /// or seeks here to continue with the next sibling.
    pub children_end: u64,
}

/// Reads one chunk header and its content, leaving `reader` positioned at the start
/// of the chunk's children.
///
/// Returns `Ok(None)` if the stream ends before a complete 4-byte identifier.
/// After a complete identifier, a missing header field or short content is an error.
pub fn read_chunk<R: Read + Seek>(reader: &mut R) -> Result<Option<Chunk>, DotVoxParseError> {
    let mut id = Vec::with_capacity(4);
    reader.by_ref().take(4).read_to_end(&mut id)?;
    let Ok(id) = <[u8; 4]>::try_from(id) else {
        return Ok(None);
    };
    let id = ChunkId(id);

    let content_len = read_header_u32(reader, Some(id))?;
    let children_len = read_header_u32(reader, Some(id))?;

    // `content_len` is untrusted, so it must not be used as an allocation size.
    let mut content = Vec::new();
    reader
        .by_ref()
        .take(u64::from(content_len))
        .read_to_end(&mut content)?;
    if content.len() as u64 != u64::from(content_len) {
        return Err(DotVoxParseError::TruncatedContent {
            id,
            declared: content_len,
            available: content.len(),
        });
    }

    let children_end = reader.stream_position()? + u64::from(children_len);

    Ok(Some(Chunk {
        id,
        content,
        children_end,
    }))
}

/// Reads a little-endian `u32` belonging to a fixed-size header, reporting end-of-stream
/// as [`DotVoxParseError::TruncatedHeader`].
pub(crate) fn read_header_u32<R: Read>(
    reader: &mut R,
    id: Option<ChunkId>,
) -> Result<u32, DotVoxParseError> {
    reader
        .read_u32::<LittleEndian>()
        .map_err(|error| match error.kind() {
            io::ErrorKind::UnexpectedEof => DotVoxParseError::TruncatedHeader { id },
            _ => DotVoxParseError::Io(error),
        })
}

// -------------------------------------------------------------------------------------------------
