//! Sources of `.vox` data, so that conversion does not have to go through [`std::fs`].

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Something with a name that `.vox` bytes can be read from.
pub trait Fileish: fmt::Debug + Send + Sync {
    /// Name of the source for messages; not necessarily a path that can be opened.
    fn display_full_path(&self) -> String;

    /// Returns the entire contents.
    fn read(&self) -> Result<Vec<u8>, io::Error>;
}

impl Fileish for PathBuf {
    fn display_full_path(&self) -> String {
        self.display().to_string()
    }

    fn read(&self) -> Result<Vec<u8>, io::Error> {
        std::fs::read(self)
    }
}

/// Data already in memory, labeled with a name for error messages.
#[derive(Clone, Eq, PartialEq)]
pub struct NamedBytes {
    name: String,
    data: Vec<u8>,
}

impl NamedBytes {
    #[allow(missing_docs)]
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

impl fmt::Debug for NamedBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { name, data } = self;
        f.debug_struct("NamedBytes")
            .field("name", name)
            .field("len", &data.len())
            .finish_non_exhaustive()
    }
}

impl Fileish for NamedBytes {
    fn display_full_path(&self) -> String {
        self.name.clone()
    }

    fn read(&self) -> Result<Vec<u8>, io::Error> {
        Ok(self.data.clone())
    }
}
