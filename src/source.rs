//! Named template and stub sources
//!
//! A [`Source`] is immutable once constructed. File-backed sources keep the
//! filesystem handle they were created with and only touch it when
//! [`Source::data`] is called.

use crate::error::Result;
use crate::filesystem::FsRef;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the bytes of a source come from
#[derive(Clone)]
pub enum Origin {
    /// Inline content
    Data(Vec<u8>),
    /// A path resolved against a filesystem at use time
    File { path: PathBuf, fs: FsRef },
}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Data(data) => f.debug_tuple("Data").field(&data.len()).finish(),
            Origin::File { path, .. } => f.debug_struct("File").field("path", path).finish(),
        }
    }
}

/// A named, lazily resolved unit of byte content
#[derive(Debug, Clone)]
pub struct Source {
    name: String,
    origin: Origin,
}

impl Source {
    /// Create a source from inline content
    pub fn from_data(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            origin: Origin::Data(data.into()),
        }
    }

    /// Create a source for `path` on `fs`, named after the path
    pub fn from_file(path: impl AsRef<Path>, fs: FsRef) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: path.display().to_string(),
            origin: Origin::File { path, fs },
        }
    }

    /// Name used in error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Resolve the content of this source.
    pub fn data(&self) -> Result<Vec<u8>> {
        match &self.origin {
            Origin::Data(data) => Ok(data.clone()),
            Origin::File { path, fs } => fs.read(path),
        }
    }
}
