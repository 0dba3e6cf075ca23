use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt as _};

use crate::mv::chunk::{ChunkId, read_chunk, read_header_u32};
use crate::mv::{DotVoxParseError, MAGIC, coord};
use crate::{GridSize, VoxModel, VoxelEntry};

/// Parses an in-memory `.vox` file.
///
/// See [`read_dot_vox()`] for details.
pub fn load_dot_vox(bytes: &[u8]) -> Result<VoxModel, DotVoxParseError> {
    read_dot_vox(&mut io::Cursor::new(bytes))
}

/// Reads a `.vox` file from `reader`, which must be positioned at the start of the file.
///
/// Only the `SIZE` and `XYZI` children of `MAIN` are interpreted; all other chunks, and
/// the children of any chunk inside `MAIN`, are skipped using their declared lengths.
/// If the file contains more than one model, only the first is read.
pub fn read_dot_vox<R: Read + Seek>(reader: &mut R) -> Result<VoxModel, DotVoxParseError> {
    let mut magic = Vec::with_capacity(MAGIC.len());
    reader
        .by_ref()
        .take(MAGIC.len() as u64)
        .read_to_end(&mut magic)?;
    if magic != MAGIC {
        return Err(DotVoxParseError::MissingMagic);
    }
    let version = read_header_u32(reader, None)?;

    let main = match read_chunk(reader)? {
        Some(chunk) if chunk.id == ChunkId::MAIN => chunk,
        other => {
            return Err(DotVoxParseError::MissingMain {
                found: other.map(|chunk| chunk.id),
            });
        }
    };

    let mut size: Option<GridSize> = None;
    let mut voxels: Option<Vec<VoxelEntry>> = None;
    while reader.stream_position()? < main.children_end {
        let Some(chunk) = read_chunk(reader)? else {
            break;
        };

        match chunk.id {
            ChunkId::SIZE if size.is_some() => {
                log::warn!("ignoring additional SIZE chunk; only the first model is converted");
            }
            ChunkId::SIZE => size = Some(parse_size(&chunk.content)?),
            ChunkId::XYZI if voxels.is_some() => {
                log::warn!("ignoring additional XYZI chunk; only the first model is converted");
            }
            ChunkId::XYZI => voxels = Some(parse_xyzi(&chunk.content)?),
            id => log::debug!(
                "skipping chunk {id} ({} content bytes, children up to offset {})",
                chunk.content.len(),
                chunk.children_end
            ),
        }

        reader.seek(SeekFrom::Start(chunk.children_end))?;
    }

    let size = size.ok_or(DotVoxParseError::MissingSize)?;
    let voxels = voxels.unwrap_or_default();
    log::info!(
        "Loaded MagicaVoxel .vox format: version {version}, size {size}, {} voxels",
        voxels.len()
    );

    Ok(VoxModel {
        version,
        size,
        voxels,
    })
}

/// Parses `SIZE` content: three little-endian `i32`s in the file's X, Y, Z order.
fn parse_size(content: &[u8]) -> Result<GridSize, DotVoxParseError> {
    const LEN: usize = 12;
    if content.len() < LEN {
        return Err(DotVoxParseError::ChunkTooShort {
            id: ChunkId::SIZE,
            len: content.len(),
            expected: LEN,
        });
    }

    let mut fields = content;
    let x = fields.read_i32::<LittleEndian>()?;
    let y = fields.read_i32::<LittleEndian>()?;
    let z = fields.read_i32::<LittleEndian>()?;
    match (u32::try_from(x), u32::try_from(y), u32::try_from(z)) {
        (Ok(x), Ok(y), Ok(z)) => Ok(coord::mv_to_grid_size([x, y, z])),
        _ => Err(DotVoxParseError::NegativeSize { x, y, z }),
    }
}

/// Parses `XYZI` content: a little-endian `u32` count followed by that many
/// `[x, y, z, color_index]` byte quadruples.
fn parse_xyzi(content: &[u8]) -> Result<Vec<VoxelEntry>, DotVoxParseError> {
    const COUNT_LEN: usize = 4;
    if content.len() < COUNT_LEN {
        return Err(DotVoxParseError::ChunkTooShort {
            id: ChunkId::XYZI,
            len: content.len(),
            expected: COUNT_LEN,
        });
    }

    let mut data = content;
    let count = data.read_u32::<LittleEndian>()?;
    if data.len() as u64 != u64::from(count) * 4 {
        return Err(DotVoxParseError::XyziLengthMismatch {
            count,
            data_len: data.len(),
        });
    }

    Ok(data
        .chunks_exact(4)
        .map(|record| coord::mv_to_grid_voxel([record[0], record[1], record[2], record[3]]))
        .collect())
}
