use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use crate::VoxModel;
use crate::document::BlocksDocument;
use crate::file::Fileish;
use crate::grid::{GridError, build_grid};
use crate::material::MaterialMapping;
use crate::mv::{self, DotVoxParseError};
use crate::usage::ColorUsage;

/// Result of a successful conversion.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct Conversion {
    /// The converted grid, ready to be written.
    pub document: BlocksDocument,
    /// Color usage of the source model.
    pub usage: ColorUsage,
}

/// Converts an already-parsed model.
pub fn convert_model(model: &VoxModel, mapping: &MaterialMapping) -> Result<Conversion, GridError> {
    let usage = ColorUsage::from_voxels(&model.voxels);
    let grid = build_grid(model, mapping)?;
    Ok(Conversion {
        document: BlocksDocument::from(grid),
        usage,
    })
}

/// Reads and converts the `.vox` file `file`. Nothing is written.
pub fn convert(file: &dyn Fileish, mapping: &MaterialMapping) -> Result<Conversion, ConvertError> {
    let error = |detail| ConvertError {
        source_path: file.display_full_path(),
        detail,
    };

    let bytes = file
        .read()
        .map_err(|e| error(ConvertErrorKind::Read { error: e }))?;
    let model = mv::load_dot_vox(&bytes).map_err(|e| error(ConvertErrorKind::Parse(e)))?;
    convert_model(&model, mapping).map_err(|e| error(ConvertErrorKind::Grid(e)))
}

/// Converts the `.vox` file at `input` and writes the resulting document to `output`.
///
/// `output` is created or truncated only once conversion has succeeded, so a failed
/// conversion leaves any existing file there untouched.
pub fn convert_file(
    input: &Path,
    output: &Path,
    mapping: &MaterialMapping,
) -> Result<Conversion, ConvertError> {
    let conversion = convert(&input.to_path_buf(), mapping)?;

    write_document(&conversion.document, output).map_err(|error| ConvertError {
        source_path: input.display().to_string(),
        detail: ConvertErrorKind::Write {
            path: output.to_owned(),
            error,
        },
    })?;
    log::info!(
        "wrote {} blocks to {}",
        conversion.document.blocks.len(),
        output.display()
    );

    Ok(conversion)
}

fn write_document(document: &BlocksDocument, path: &Path) -> Result<(), io::Error> {
    let mut writer = io::BufWriter::new(fs::File::create(path)?);
    document.write_json(&mut writer)?;
    writer.flush()
}

// -------------------------------------------------------------------------------------------------

/// Fatal errors that may be encountered during a conversion.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
#[error("failed to convert '{source_path}'")]
pub struct ConvertError {
    /// The path, as produced by [`Fileish::display_full_path()`], of the file being
    /// converted.
    pub source_path: String,

    #[source]
    pub(crate) detail: ConvertErrorKind,
}

impl ConvertError {
    /// Returns the specific reason for the failure.
    pub fn kind(&self) -> &ConvertErrorKind {
        &self.detail
    }
}

/// Specific reason why a conversion failed.
/// Always contained within a [`ConvertError`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertErrorKind {
    /// An IO error occurred while reading the input.
    #[non_exhaustive]
    #[error("failed to read the input file")]
    Read {
        /// The IO error that occurred while reading.
        #[source]
        error: io::Error,
    },

    /// The input is not a valid `.vox` file.
    #[error("failed to parse the data")]
    Parse(#[source] DotVoxParseError),

    /// The model could not be turned into a grid, most often because of unmapped colors.
    #[error("failed to build the block grid")]
    Grid(#[source] GridError),

    /// The output could not be written.
    #[non_exhaustive]
    #[error("failed to write output to '{}'", .path.display())]
    Write {
        /// Path of the output file.
        path: PathBuf,
        /// The IO error that occurred while writing.
        #[source]
        error: io::Error,
    },
}

// -------------------------------------------------------------------------------------------------
