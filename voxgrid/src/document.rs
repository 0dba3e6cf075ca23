//! The JSON blocks document that conversion produces.
//!
//! A document looks like `{"version":1,"size":[2,1,1],"blocks":[0,1]}`:
//! `size` is `[width, height, depth]` and `blocks` holds one material identifier per
//! cell in [`flatten_index`](crate::grid::flatten_index) order.

use std::io;

use crate::GridSize;
use crate::grid::{DenseGrid, GridError};
use crate::material::MaterialId;

/// Value of the `version` field in documents this library writes.
pub const FORMAT_VERSION: u32 = 1;

/// Serializable form of a [`DenseGrid`].
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[non_exhaustive]
pub struct BlocksDocument {
    /// Document format version; [`FORMAT_VERSION`] when written by this library.
    pub version: u32,
    #[allow(missing_docs)]
    pub size: GridSize,
    /// Material of every cell, in linear order.
    pub blocks: Vec<MaterialId>,
}

impl BlocksDocument {
    /// Writes the document as compact JSON, with no trailing newline.
    pub fn write_json<W: io::Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer(writer, self)
    }

    /// Returns the document as compact JSON.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a document previously written by [`BlocksDocument::write_json()`].
    ///
    /// The version is not checked; see [`BlocksDocument::into_grid()`].
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Converts the document back to a grid, checking that `blocks` fills `size`.
    pub fn into_grid(self) -> Result<DenseGrid, GridError> {
        if self.version != FORMAT_VERSION {
            log::warn!(
                "blocks document has version {}, expected {FORMAT_VERSION}",
                self.version
            );
        }
        DenseGrid::from_elements(self.size, self.blocks)
    }
}

impl From<DenseGrid> for BlocksDocument {
    fn from(grid: DenseGrid) -> Self {
        Self {
            version: FORMAT_VERSION,
            size: grid.size(),
            blocks: grid.into_elements(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn example_grid() -> DenseGrid {
        DenseGrid::from_elements(
            GridSize::new(2, 1, 2),
            vec![MaterialId(0), MaterialId(1), MaterialId(2), MaterialId(99)],
        )
        .unwrap()
    }

    #[test]
    fn exact_json() {
        let document = BlocksDocument::from(example_grid());
        assert_eq!(
            document.to_json_string().unwrap(),
            r#"{"version":1,"size":[2,1,2],"blocks":[0,1,2,99]}"#
        );

        let mut written = Vec::new();
        document.write_json(&mut written).unwrap();
        assert_eq!(written, document.to_json_string().unwrap().into_bytes());
    }

    #[test]
    fn empty_grid_json() {
        let document = BlocksDocument::from(DenseGrid::new_air(GridSize::new(0, 0, 0)).unwrap());
        assert_eq!(
            document.to_json_string().unwrap(),
            r#"{"version":1,"size":[0,0,0],"blocks":[]}"#
        );
    }

    #[test]
    fn read_back() {
        let document = BlocksDocument::from_json_slice(
            br#"{ "version": 1, "size": [2, 1, 2], "blocks": [0, 1, 2, 99] }"#,
        )
        .unwrap();
        assert_eq!(document.into_grid().unwrap(), example_grid());
    }

    #[test]
    fn read_wrong_length() {
        let document =
            BlocksDocument::from_json_slice(br#"{"version":1,"size":[2,2,2],"blocks":[0,1]}"#)
                .unwrap();
        let error = document.into_grid().unwrap_err();
        assert!(
            matches!(error, GridError::LengthMismatch { len: 2, .. }),
            "{error:?}"
        );
    }

    #[test]
    fn read_bad_size() {
        BlocksDocument::from_json_slice(br#"{"version":1,"size":[2,2],"blocks":[]}"#)
            .unwrap_err();
    }
}
