//! Statistics about which palette colors a model uses.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use itertools::Itertools as _;

use crate::VoxelEntry;

/// Number of voxels using each nonzero color index.
///
/// Every voxel in the model is counted, including ones outside its declared size.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColorUsage {
    counts: BTreeMap<u8, usize>,
    /// The keys of `counts`, in order of first appearance.
    first_seen: Vec<u8>,
}

impl ColorUsage {
    /// Tallies the color indices of `voxels`, ignoring index 0.
    pub fn from_voxels<'a>(voxels: impl IntoIterator<Item = &'a VoxelEntry>) -> Self {
        let indices: Vec<u8> = voxels
            .into_iter()
            .map(|voxel| voxel.color_index)
            .filter(|&index| index != 0)
            .collect();
        Self {
            counts: indices.iter().copied().counts().into_iter().collect(),
            first_seen: indices.into_iter().unique().collect(),
        }
    }

    /// Distinct color indices in use, in increasing order.
    pub fn used_indices(&self) -> impl Iterator<Item = u8> + '_ {
        self.counts.keys().copied()
    }

    /// Number of voxels with the given color index.
    pub fn count(&self, color_index: u8) -> usize {
        self.counts.get(&color_index).copied().unwrap_or(0)
    }

    /// Total number of counted voxels.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Returns up to `n` color indices with their counts, most used first.
    /// Equal counts keep the order in which the indices first appeared.
    pub fn most_common(&self, n: usize) -> Vec<(u8, usize)> {
        self.first_seen
            .iter()
            .map(|&index| (index, self.count(index)))
            .sorted_by_key(|&(_, count)| Reverse(count))
            .take(n)
            .collect()
    }
}
