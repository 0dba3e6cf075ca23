//! The human-readable report printed after a successful conversion.

use std::fmt;
use std::path::Path;

use voxgrid::Conversion;

/// How many entries the “top indices” line shows.
const TOP_COUNT: usize = 8;

/// [`fmt::Display`]s the summary of converting `input` to `output`.
#[derive(Debug)]
pub(crate) struct Summary<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub conversion: &'a Conversion,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            input,
            output,
            conversion,
        } = *self;
        let usage = &conversion.usage;

        writeln!(f, "Converted {} -> {}", input.display(), output.display())?;
        writeln!(f, "Size: {}", conversion.document.size)?;
        writeln!(
            f,
            "Used color indices: {:?}",
            usage.used_indices().collect::<Vec<u8>>()
        )?;
        write!(f, "Top indices by count: ")?;
        for (i, (index, count)) in usage.most_common(TOP_COUNT).into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{index}:{count}")?;
        }
        Ok(())
    }
}
