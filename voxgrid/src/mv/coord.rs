use crate::{GridSize, VoxelEntry};

// -------------------------------------------------------------------------------------------------

/// Converts the dimensions from a `SIZE` chunk to grid dimensions.
///
/// MagicaVoxel is Z-up, while grids are Y-up, so the file's Z becomes our height
/// and the file's Y becomes our depth. (Unlike a rotation, this is a reflection; the
/// output keeps the file's voxel order along each axis.)
pub(crate) fn mv_to_grid_size([x, y, z]: [u32; 3]) -> GridSize {
    GridSize::new(x, z, y)
}

/// Converts one 4-byte `XYZI` record to a [`VoxelEntry`], with the same axis swap
/// as [`mv_to_grid_size`].
pub(crate) fn mv_to_grid_voxel([x, y, z, color_index]: [u8; 4]) -> VoxelEntry {
    VoxelEntry {
        x,
        y: z,
        z: y,
        color_index,
    }
}

// -------------------------------------------------------------------------------------------------
