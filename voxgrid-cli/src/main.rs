//! Command-line converter from MagicaVoxel `.vox` models to JSON block grids.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use clap::Parser as _;

use voxgrid::{ConvertError, ConvertErrorKind, GridError, MaterialMapping, MaterialOverrides};

mod command_options;
mod config_files;
mod logging;
mod summary;

use command_options::VoxgridArgs;
use summary::Summary;

fn main() -> Result<(), anyhow::Error> {
    let options = VoxgridArgs::parse();
    logging::install(&options.logging)?;

    let overrides = match &options.overrides {
        Some(path) => config_files::read_overrides_file(path)?,
        None => MaterialOverrides::builtin(),
    };
    let mapping = MaterialMapping::new(overrides, options.policy());

    let conversion = voxgrid::convert_file(&options.input, &options.output, &mapping)
        .unwrap_or_else(|e| report_conversion_error_and_exit(e));

    println!(
        "{}",
        Summary {
            input: &options.input,
            output: &options.output,
            conversion: &conversion,
        }
    );
    Ok(())
}

/// Prints the error chain, then how to get past unmapped colors if that was the cause.
fn report_conversion_error_and_exit(error: ConvertError) -> ! {
    let remedy = matches!(
        error.kind(),
        ConvertErrorKind::Grid(GridError::Unmapped(_))
    );

    eprintln!("Error: {:?}", anyhow::Error::new(error));
    if remedy {
        eprintln!(
            "\nTo convert anyway, add the listed indices to an --overrides file, \
            or run with --auto-identity, or --default <INT>."
        );
    }
    std::process::exit(1);
}
