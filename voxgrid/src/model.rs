use core::fmt;

/// Extent of a voxel model in grid coordinates: X is width, Y is up, Z is depth.
///
/// This is the axis convention of the output document, not of the `.vox` file;
/// see [`crate::mv`] for the conversion.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(from = "[u32; 3]", into = "[u32; 3]")]
#[expect(clippy::exhaustive_structs)]
pub struct GridSize {
    /// Size along the X axis.
    pub width: u32,
    /// Size along the Y (up) axis.
    pub height: u32,
    /// Size along the Z axis.
    pub depth: u32,
}

impl GridSize {
    /// Constructs a [`GridSize`] from its components in X, Y, Z order.
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Returns the number of cells in a grid of this size, or [`None`] if it does not fit
    /// in a [`usize`].
    pub fn volume(self) -> Option<usize> {
        let Self {
            width,
            height,
            depth,
        } = self;
        usize::try_from(width)
            .ok()?
            .checked_mul(usize::try_from(height).ok()?)?
            .checked_mul(usize::try_from(depth).ok()?)
    }

    /// Whether the given cell lies within `[0, width) × [0, height) × [0, depth)`.
    pub fn contains(self, [x, y, z]: [u32; 3]) -> bool {
        x < self.width && y < self.height && z < self.depth
    }

    /// Returns the components as an array in X, Y, Z order.
    pub const fn to_array(self) -> [u32; 3] {
        [self.width, self.height, self.depth]
    }
}

impl From<[u32; 3]> for GridSize {
    fn from([width, height, depth]: [u32; 3]) -> Self {
        Self::new(width, height, depth)
    }
}

impl From<GridSize> for [u32; 3] {
    fn from(size: GridSize) -> Self {
        size.to_array()
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            width,
            height,
            depth,
        } = self;
        write!(f, "{width}x{height}x{depth}")
    }
}

/// One occupied cell from a `.vox` model, already in grid coordinates.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct VoxelEntry {
    /// X coordinate.
    pub x: u8,
    /// Y coordinate.
    pub y: u8,
    /// Z coordinate.
    pub z: u8,
    /// Palette slot of the voxel. Zero is empty space; 1 through 255 are colors.
    pub color_index: u8,
}

impl VoxelEntry {
    /// Position of this voxel as grid coordinates.
    pub fn position(self) -> [u32; 3] {
        [self.x, self.y, self.z].map(u32::from)
    }
}

/// The data of a single model extracted from a `.vox` file.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct VoxModel {
    /// File format version number from the header. Not interpreted.
    pub version: u32,
    /// Declared extent of the model, in grid coordinates.
    pub size: GridSize,
    /// Occupied cells in file order. Later entries take precedence over earlier ones
    /// at the same position.
    pub voxels: Vec<VoxelEntry>,
}

impl VoxModel {
    /// Constructs a [`VoxModel`] without reading any file.
    pub fn new(size: GridSize, voxels: Vec<VoxelEntry>) -> Self {
        Self {
            version: crate::mv::DEFAULT_VERSION,
            size,
            voxels,
        }
    }
}
