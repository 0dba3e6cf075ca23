//! Dense material grids and their construction from [`VoxModel`]s.

use std::fmt;

use crate::material::{MaterialId, MaterialMapping, UnmappedColorIndices};
use crate::usage::ColorUsage;
use crate::{GridSize, VoxModel};

// -------------------------------------------------------------------------------------------------

/// Returns the linear index of `position` within a grid of `size`.
///
/// Elements are ordered with X varying fastest, then Z, then Y; that is, the grid is a
/// stack of horizontal layers from the bottom up, each layer stored row by row.
///
/// The caller must ensure that `size.contains(position)` and that the volume of `size`
/// fits in [`usize`]; otherwise the result is meaningless or the arithmetic overflows.
pub fn flatten_index(size: GridSize, [x, y, z]: [u32; 3]) -> usize {
    let [x, y, z] = [x, y, z].map(|c| c as usize);
    let width = size.width as usize;
    let depth = size.depth as usize;
    (y * depth + z) * width + x
}

/// A box of [`MaterialId`]s with one entry for every cell of its [`GridSize`].
///
/// A [`DenseGrid`] whose volume exceeds [`usize::MAX`] cannot exist.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct DenseGrid {
    size: GridSize,
    /// Invariant: `blocks.len() == size.volume()`, in [`flatten_index`] order.
    blocks: Vec<MaterialId>,
}

impl DenseGrid {
    /// Constructs a grid of the given size in which every cell is [`MaterialId::AIR`].
    ///
    /// Returns an error if the grid is too large to allocate.
    pub fn new_air(size: GridSize) -> Result<Self, GridError> {
        let volume = size.volume().ok_or(GridError::TooLarge { size })?;
        let mut blocks = Vec::new();
        blocks
            .try_reserve_exact(volume)
            .map_err(|_| GridError::TooLarge { size })?;
        blocks.resize(volume, MaterialId::AIR);
        Ok(Self { size, blocks })
    }

    /// Constructs a grid from elements already in [`flatten_index`] order.
    ///
    /// Returns an error if the number of elements does not match the volume of `size`.
    pub fn from_elements(size: GridSize, blocks: Vec<MaterialId>) -> Result<Self, GridError> {
        if size.volume() == Some(blocks.len()) {
            Ok(Self { size, blocks })
        } else {
            Err(GridError::LengthMismatch {
                size,
                len: blocks.len(),
            })
        }
    }

    #[allow(missing_docs)]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the material at `position`, or [`None`] if it is outside the grid.
    pub fn get(&self, position: [u32; 3]) -> Option<MaterialId> {
        self.size
            .contains(position)
            .then(|| self.blocks[flatten_index(self.size, position)])
    }

    /// Replaces the material at `position`.
    ///
    /// Returns `false`, and does nothing, if `position` is outside the grid.
    pub fn set(&mut self, position: [u32; 3], material: MaterialId) -> bool {
        if self.size.contains(position) {
            self.blocks[flatten_index(self.size, position)] = material;
            true
        } else {
            false
        }
    }

    /// Returns all elements in [`flatten_index`] order.
    pub fn as_linear(&self) -> &[MaterialId] {
        &self.blocks
    }

    /// Returns all elements in [`flatten_index`] order.
    pub fn into_elements(self) -> Vec<MaterialId> {
        self.blocks
    }
}

impl fmt::Debug for DenseGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { size, blocks } = self;
        // Layer by layer, so that small grids in test failures are readable.
        let layer_len = (size.width as usize) * (size.depth as usize);
        let mut ds = f.debug_struct("DenseGrid");
        ds.field("size", size);
        if layer_len == 0 {
            ds.field("blocks", blocks);
        } else {
            ds.field(
                "layers",
                &blocks
                    .chunks(layer_len)
                    .map(|layer| layer.iter().map(|m| m.0).collect::<Vec<_>>())
                    .collect::<Vec<_>>(),
            );
        }
        ds.finish()
    }
}

// -------------------------------------------------------------------------------------------------

/// Fills a [`DenseGrid`] of the model's size from its voxels.
///
/// * Cells not mentioned by any voxel are air.
/// * Voxels outside the model's size are dropped.
/// * When several voxels share a position, the last one in file order wins.
/// * Materials come from `mapping`. If any in-bounds voxel's color index is unmapped,
///   no grid is produced. The error then lists every unmapped index the model uses,
///   with counts over all of its voxels, so that out-of-bounds ones are reported too.
pub fn build_grid(model: &VoxModel, mapping: &MaterialMapping) -> Result<DenseGrid, GridError> {
    let mut grid = DenseGrid::new_air(model.size)?;
    let mut found_unmapped = false;
    let mut dropped: usize = 0;

    for voxel in &model.voxels {
        let position = voxel.position();
        if !model.size.contains(position) {
            dropped += 1;
            continue;
        }
        match mapping.resolve(voxel.color_index) {
            Some(material) => {
                grid.set(position, material);
            }
            None => found_unmapped = true,
        }
    }

    if dropped > 0 {
        log::debug!(
            "dropped {dropped} voxels outside the model size {size}",
            size = model.size
        );
    }
    if found_unmapped {
        let usage = ColorUsage::from_voxels(&model.voxels);
        return Err(GridError::Unmapped(UnmappedColorIndices {
            indices: usage
                .used_indices()
                .filter(|&index| mapping.resolve(index).is_none())
                .map(|index| (index, usage.count(index)))
                .collect(),
        }));
    }
    Ok(grid)
}

// -------------------------------------------------------------------------------------------------

/// Error from constructing a [`DenseGrid`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum GridError {
    /// The grid has more cells than can be stored.
    #[error(
        "grid of size {size} has {volume} cells, which is too many to allocate",
        volume = volume_u128(.size)
    )]
    TooLarge {
        #[allow(missing_docs)]
        size: GridSize,
    },

    /// The provided elements do not fill the grid exactly.
    #[error("data of length {len} cannot fill grid of size {size}")]
    LengthMismatch {
        #[allow(missing_docs)]
        size: GridSize,
        /// Number of elements provided.
        len: usize,
    },

    /// Some voxels have color indices with no material assigned.
    #[error(transparent)]
    Unmapped(#[from] UnmappedColorIndices),
}

/// u128 is large enough to hold the product of three u32s.
fn volume_u128(size: &GridSize) -> u128 {
    size.to_array().into_iter().map(u128::from).product()
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VoxelEntry;
    use crate::material::{MaterialOverrides, UnknownIndexPolicy};
    use pretty_assertions::assert_eq;

    fn voxel(x: u8, y: u8, z: u8, color_index: u8) -> VoxelEntry {
        VoxelEntry {
            x,
            y,
            z,
            color_index,
        }
    }

    fn strict_builtin() -> MaterialMapping {
        MaterialMapping::new(MaterialOverrides::builtin(), UnknownIndexPolicy::Strict)
    }

    fn ids(ids: &[u32]) -> Vec<MaterialId> {
        ids.iter().copied().map(MaterialId).collect()
    }

    #[test]
    fn flatten_index_is_a_bijection() {
        let size = GridSize::new(3, 4, 2);
        let mut seen = vec![false; size.volume().unwrap()];
        for x in 0..3 {
            for y in 0..4 {
                for z in 0..2 {
                    let i = flatten_index(size, [x, y, z]);
                    assert!(!seen[i], "{i} produced twice");
                    seen[i] = true;
                }
            }
        }
        assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn flatten_index_order() {
        let size = GridSize::new(2, 3, 4);
        assert_eq!(flatten_index(size, [0, 0, 0]), 0);
        assert_eq!(flatten_index(size, [1, 0, 0]), 1);
        assert_eq!(flatten_index(size, [0, 0, 1]), 2);
        assert_eq!(flatten_index(size, [0, 1, 0]), 8);
        assert_eq!(flatten_index(size, [1, 2, 3]), 23);
    }

    #[test]
    fn empty_model_is_all_air() {
        let model = VoxModel::new(GridSize::new(2, 2, 3), vec![]);
        let grid = build_grid(&model, &strict_builtin()).unwrap();
        assert_eq!(grid.as_linear(), &[MaterialId::AIR; 12]);
    }

    #[test]
    fn zero_size() {
        let model = VoxModel::new(GridSize::new(0, 5, 5), vec![voxel(0, 0, 0, 1)]);
        let grid = build_grid(&model, &strict_builtin()).unwrap();
        assert_eq!(grid.into_elements(), vec![]);
    }

    #[test]
    fn places_materials() {
        let model = VoxModel::new(
            GridSize::new(2, 2, 1),
            vec![voxel(1, 0, 0, 1), voxel(0, 1, 0, 2)],
        );
        let grid = build_grid(&model, &strict_builtin()).unwrap();
        assert_eq!(grid.into_elements(), ids(&[0, 1, 2, 0]));
    }

    #[test]
    fn last_write_wins() {
        let model = VoxModel::new(
            GridSize::new(1, 1, 1),
            vec![voxel(0, 0, 0, 1), voxel(0, 0, 0, 2)],
        );
        let grid = build_grid(&model, &strict_builtin()).unwrap();
        assert_eq!(grid.get([0, 0, 0]), Some(MaterialId(2)));
    }

    #[test]
    fn later_air_clears_cell() {
        let model = VoxModel::new(
            GridSize::new(1, 1, 1),
            vec![voxel(0, 0, 0, 1), voxel(0, 0, 0, 0)],
        );
        let grid = build_grid(&model, &strict_builtin()).unwrap();
        assert_eq!(grid.get([0, 0, 0]), Some(MaterialId::AIR));
    }

    #[test]
    fn out_of_bounds_voxels_are_dropped() {
        let model = VoxModel::new(
            GridSize::new(2, 2, 2),
            vec![voxel(2, 0, 0, 1), voxel(0, 5, 0, 2), voxel(1, 1, 1, 1)],
        );
        let grid = build_grid(&model, &strict_builtin()).unwrap();
        let mut expected = vec![MaterialId::AIR; 8];
        expected[7] = MaterialId(1);
        assert_eq!(grid.into_elements(), expected);
    }

    /// Out-of-bounds voxels do not count against strict mapping.
    #[test]
    fn out_of_bounds_voxels_are_not_checked() {
        let model = VoxModel::new(GridSize::new(1, 1, 1), vec![voxel(3, 3, 3, 200)]);
        build_grid(&model, &strict_builtin()).unwrap();
    }

    #[test]
    fn strict_reports_all_unmapped() {
        let model = VoxModel::new(
            GridSize::new(4, 1, 1),
            vec![
                voxel(0, 0, 0, 9),
                voxel(1, 0, 0, 5),
                voxel(2, 0, 0, 5),
                voxel(3, 0, 0, 1),
                voxel(3, 0, 0, 5),
            ],
        );
        let error = build_grid(&model, &strict_builtin()).unwrap_err();
        assert_eq!(
            error,
            GridError::Unmapped(UnmappedColorIndices {
                indices: vec![(5, 3), (9, 1)]
            })
        );
    }

    #[test]
    fn strict_counts_out_of_bounds_voxels_too() {
        let model = VoxModel::new(
            GridSize::new(2, 1, 1),
            vec![voxel(0, 0, 0, 5), voxel(5, 0, 0, 5), voxel(7, 0, 0, 9)],
        );
        let error = build_grid(&model, &strict_builtin()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "unmapped MagicaVoxel color indices found: 5 (count=2), 9 (count=1); \
            add material overrides for them or choose the auto-identity or default policy"
        );
    }

    #[test]
    fn auto_identity() {
        let model = VoxModel::new(GridSize::new(1, 1, 1), vec![voxel(0, 0, 0, 7)]);
        let mapping =
            MaterialMapping::new(MaterialOverrides::builtin(), UnknownIndexPolicy::AutoIdentity);
        let grid = build_grid(&model, &mapping).unwrap();
        assert_eq!(grid.into_elements(), ids(&[7]));
    }

    #[test]
    fn fallback() {
        let model = VoxModel::new(
            GridSize::new(2, 1, 1),
            vec![voxel(0, 0, 0, 7), voxel(1, 0, 0, 2)],
        );
        let mapping = MaterialMapping::new(
            MaterialOverrides::builtin(),
            UnknownIndexPolicy::Fallback(MaterialId(99)),
        );
        let grid = build_grid(&model, &mapping).unwrap();
        assert_eq!(grid.into_elements(), ids(&[99, 2]));
    }

    #[test]
    fn too_large() {
        let size = GridSize::new(u32::MAX, u32::MAX, u32::MAX);
        let error = DenseGrid::new_air(size).unwrap_err();
        assert_eq!(error, GridError::TooLarge { size });
        assert_eq!(
            error.to_string(),
            "grid of size 4294967295x4294967295x4294967295 has \
            79228162458924105385300197375 cells, which is too many to allocate"
        );
    }

    #[test]
    fn from_elements_length_mismatch() {
        let size = GridSize::new(2, 2, 2);
        assert_eq!(
            DenseGrid::from_elements(size, vec![MaterialId::AIR; 7]),
            Err(GridError::LengthMismatch { size, len: 7 })
        );
        DenseGrid::from_elements(size, vec![MaterialId::AIR; 8]).unwrap();
    }

    #[test]
    fn get_and_set_out_of_bounds() {
        let mut grid = DenseGrid::new_air(GridSize::new(1, 1, 1)).unwrap();
        assert!(!grid.set([1, 0, 0], MaterialId(1)));
        assert_eq!(grid.get([0, 1, 0]), None);
        assert!(grid.set([0, 0, 0], MaterialId(1)));
        assert_eq!(grid.get([0, 0, 0]), Some(MaterialId(1)));
    }
}
