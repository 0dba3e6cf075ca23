use std::io;

use crate::mv::ChunkId;

/// Errors that may occur while reading `.vox` data.
///
/// All of these are fatal: no partial model is produced.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DotVoxParseError {
    /// The data does not start with the `VOX ` magic bytes.
    #[error("not a MagicaVoxel .vox file (missing 'VOX ' header)")]
    MissingMagic,

    /// The first chunk after the file header is absent or is not `MAIN`.
    #[error("invalid .vox file: expected MAIN chunk, found {}", describe_found(.found.as_ref()))]
    MissingMain {
        /// Identifier of the chunk that was found instead, if any.
        found: Option<ChunkId>,
    },

    /// The data ended in the middle of a fixed-size header.
    #[error("file ends inside the header of {}", describe_header_owner(.id.as_ref()))]
    TruncatedHeader {
        /// The chunk whose header was being read, or [`None`] for the file header.
        id: Option<ChunkId>,
    },

    /// A chunk declared more content bytes than the data contains.
    #[error("chunk {id} declares {declared} content bytes but only {available} remain")]
    TruncatedContent {
        /// Identifier of the offending chunk.
        id: ChunkId,
        /// Content length given in the chunk header.
        declared: u32,
        /// Number of bytes that could actually be read.
        available: usize,
    },

    /// A chunk's content is too short to contain its fixed-size fields.
    #[error("chunk {id} has {len} content bytes but needs at least {expected}")]
    ChunkTooShort {
        /// Identifier of the offending chunk.
        id: ChunkId,
        /// Actual content length.
        len: usize,
        /// Minimum content length for this kind of chunk.
        expected: usize,
    },

    /// An `XYZI` chunk's voxel count disagrees with its content length.
    #[error(
        "XYZI length mismatch: chunk declares {count} voxels but has {data_len} bytes of voxel data"
    )]
    XyziLengthMismatch {
        /// Voxel count given at the start of the chunk.
        count: u32,
        /// Number of bytes following the count.
        data_len: usize,
    },

    /// A `SIZE` chunk contains a negative dimension.
    #[error("model size {x}×{y}×{z} has a negative dimension")]
    NegativeSize {
        /// Components as stored in the file, in the file's axis order.
        x: i32,
        /// See `x`.
        y: i32,
        /// See `x`.
        z: i32,
    },

    /// The `MAIN` chunk contains no `SIZE` chunk, so the grid dimensions are unknown.
    #[error("missing SIZE chunk")]
    MissingSize,

    /// An IO error occurred while reading.
    #[error("failed to read .vox data")]
    Io(#[from] io::Error),
}

fn describe_found(found: Option<&ChunkId>) -> String {
    match found {
        Some(id) => format!("chunk {id}"),
        None => String::from("end of file"),
    }
}

fn describe_header_owner(id: Option<&ChunkId>) -> String {
    match id {
        Some(id) => format!("chunk {id}"),
        None => String::from("the file"),
    }
}
