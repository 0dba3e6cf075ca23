//! Command line option parsing.

use std::path::PathBuf;

use clap::Parser;

use voxgrid::{MaterialId, UnknownIndexPolicy};

use crate::logging::LoggingArgs;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "voxgrid", about, version,
    help_template = "\
{name} {version}
{about-with-newline}
{usage-heading}
    {usage}

{all-args}{after-help}",
)]
pub(crate) struct VoxgridArgs {
    /// MagicaVoxel .vox file to convert.
    #[arg(value_name = "INPUT")]
    pub(crate) input: PathBuf,

    /// Path to write the JSON blocks document to.
    #[arg(value_name = "OUTPUT")]
    pub(crate) output: PathBuf,

    /// Use each unmapped color index as its own material identifier.
    ///
    /// Takes precedence over --default.
    #[arg(long = "auto-identity")]
    pub(crate) auto_identity: bool,

    /// Use this material identifier for every unmapped color index.
    #[arg(long = "default", value_name = "INT")]
    pub(crate) default_material: Option<u32>,

    /// JSON file of color index to material overrides, replacing the built-in table.
    ///
    /// Example: {"1": 1, "2": 2, "5": 17}
    #[arg(long = "overrides", value_name = "FILE")]
    pub(crate) overrides: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
}

impl VoxgridArgs {
    /// How unmapped color indices should be handled, per `--auto-identity` and `--default`.
    pub(crate) fn policy(&self) -> UnknownIndexPolicy {
        UnknownIndexPolicy::from_flags(self.auto_identity, self.default_material.map(MaterialId))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> clap::error::Result<VoxgridArgs> {
        VoxgridArgs::try_parse_from(std::iter::once("voxgrid").chain(args.iter().copied()))
    }

    #[test]
    fn positionals() {
        let args = parse(&["in.vox", "out.json"]).unwrap();
        assert_eq!(args.input, PathBuf::from("in.vox"));
        assert_eq!(args.output, PathBuf::from("out.json"));
        assert_eq!(args.overrides, None);
        assert!(!args.logging.verbose);
        assert_eq!(args.policy(), UnknownIndexPolicy::Strict);
    }

    #[test]
    fn missing_output() {
        let e = parse(&["in.vox"]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn auto_identity() {
        assert_eq!(
            parse(&["in.vox", "out.json", "--auto-identity"])
                .unwrap()
                .policy(),
            UnknownIndexPolicy::AutoIdentity
        );
    }

    #[test]
    fn default_material() {
        assert_eq!(
            parse(&["--default", "99", "in.vox", "out.json"])
                .unwrap()
                .policy(),
            UnknownIndexPolicy::Fallback(MaterialId(99))
        );
    }

    #[test]
    fn auto_identity_wins_over_default() {
        assert_eq!(
            parse(&["in.vox", "out.json", "--default", "3", "--auto-identity"])
                .unwrap()
                .policy(),
            UnknownIndexPolicy::AutoIdentity
        );
    }

    #[test]
    fn default_requires_integer() {
        let e = parse(&["in.vox", "out.json", "--default", "stone"]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn default_requires_value() {
        let e = parse(&["in.vox", "out.json", "--default"]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn overrides_and_verbose() {
        let args = parse(&["-v", "--overrides", "map.json", "in.vox", "out.json"]).unwrap();
        assert_eq!(args.overrides, Some(PathBuf::from("map.json")));
        assert!(args.logging.verbose);
    }
}
