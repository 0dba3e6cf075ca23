//! Reading of MagicaVoxel `.vox` files.
//!
//! [Format description](https://github.com/ephtracy/voxel-model/blob/master/MagicaVoxel-file-format-vox.txt)

mod chunk;
mod coord;
mod error;
mod import;

pub use chunk::{Chunk, ChunkId, read_chunk};
pub use error::DotVoxParseError;
pub use import::{load_dot_vox, read_dot_vox};

/// Bytes every `.vox` file starts with.
pub const MAGIC: [u8; 4] = *b"VOX ";

/// Format version written by current versions of MagicaVoxel.
///
/// The version in a file is recorded but never checked.
pub const DEFAULT_VERSION: u32 = 150;
