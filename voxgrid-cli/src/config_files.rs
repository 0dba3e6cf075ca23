use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use voxgrid::MaterialOverrides;

/// Reads a material overrides file: a JSON object mapping color indices (as strings)
/// to material identifiers, such as `{"1": 1, "2": 2, "5": 17}`.
///
/// The result replaces the built-in overrides entirely.
pub(crate) fn read_overrides_file(path: &Path) -> Result<MaterialOverrides, anyhow::Error> {
    let file = File::open(path)
        .with_context(|| format!("failed to open overrides file {}", path.display()))?;
    let overrides: MaterialOverrides = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("invalid overrides file {}", path.display()))?;
    log::debug!(
        "Loaded {count} material overrides from {path}",
        count = overrides.len(),
        path = path.display()
    );
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use voxgrid::MaterialId;

    #[test]
    fn read_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.json");
        std::fs::write(&path, r#"{"1": 3, "200": 40}"#).unwrap();

        assert_eq!(
            read_overrides_file(&path).unwrap(),
            MaterialOverrides::from_iter([(1, MaterialId(3)), (200, MaterialId(40))])
        );
    }

    #[test]
    fn read_missing() {
        let dir = tempfile::tempdir().unwrap();
        let error = read_overrides_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(
            error.to_string().starts_with("failed to open overrides file"),
            "{error:#}"
        );
    }

    #[test]
    fn read_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.json");
        std::fs::write(&path, r#"{"1": "stone"}"#).unwrap();

        let error = read_overrides_file(&path).unwrap_err();
        assert!(
            error.to_string().starts_with("invalid overrides file"),
            "{error:#}"
        );
    }
}
