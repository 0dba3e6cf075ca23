//! Conversion of [MagicaVoxel] `.vox` models into dense JSON block grids.
//!
//! The pipeline is:
//!
//! 1. [`mv::load_dot_vox()`] reads the first model of a `.vox` file into a [`VoxModel`],
//!    swapping the file's Z-up axes to Y-up grid axes.
//! 2. [`build_grid()`] assigns a material to each voxel according to a
//!    [`MaterialMapping`] and fills a [`DenseGrid`], with air everywhere else.
//! 3. [`BlocksDocument`] serializes the grid as compact JSON.
//!
//! [`convert_file()`] performs all of these and writes the result.
//!
//! [MagicaVoxel]: https://ephtracy.github.io/

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

mod convert;
pub use convert::*;

pub mod document;
pub use document::{BlocksDocument, FORMAT_VERSION};

pub mod file;

pub mod grid;
pub use grid::{DenseGrid, GridError, build_grid, flatten_index};

pub mod material;
pub use material::{
    MaterialId, MaterialMapping, MaterialOverrides, UnknownIndexPolicy, UnmappedColorIndices,
};

mod model;
pub use model::{GridSize, VoxModel, VoxelEntry};

pub mod mv;

pub mod usage;
pub use usage::ColorUsage;
