//! Filesystem abstraction used to resolve template and stub sources
//!
//! Requests never read files eagerly. They carry a shared [`FsRef`] handle and
//! file-backed sources resolve against it when the render engine asks for
//! their bytes. Three implementations are provided:
//!
//! - [`OsFS`]: the ambient process filesystem, the default for every request.
//! - [`MemoryFS`]: an in-memory map of files, handy for tests and for
//!   embedding documents.
//! - [`WorkDirFS`]: a view of another filesystem with relative paths rooted
//!   at a working directory.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Read-only filesystem operations needed to resolve sources.
pub trait FileSystem: Debug + Send + Sync {
    /// Read the full content of the file at `path`.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Whether `path` names a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether `path` names an existing file or directory.
    fn exists(&self, path: &Path) -> bool;
}

/// Shared handle to a filesystem.
///
/// Requests and their shadow copies alias the same filesystem; options only
/// ever replace the handle, never mutate what it points to.
pub type FsRef = Arc<dyn FileSystem>;

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component where possible.
pub fn normalize<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = match result.components().next_back() {
                    Some(Component::Normal(_)) => result.pop(),
                    _ => false,
                };
                if !popped && !result.has_root() {
                    result.push("..");
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

/// The process filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFS;

impl OsFS {
    /// Shared handle to the process filesystem
    pub fn shared() -> FsRef {
        Arc::new(OsFS)
    }
}

impl FileSystem for OsFS {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|e| Error::Filesystem {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// In-memory filesystem
///
/// Directories are implicit: a path is a directory when at least one file
/// lives below it. The roots `/`, `.` and the empty path are always
/// directories.
#[derive(Debug, Clone, Default)]
pub struct MemoryFS {
    /// Files stored as normalized path -> content mapping
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryFS {
    /// Create a new empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, content: impl Into<Vec<u8>>) -> Result<()> {
        self.files.insert(normalize(path), content.into());
        Ok(())
    }

    /// Add a file with string content
    pub fn add_file_string<P: AsRef<Path>>(&mut self, path: P, content: &str) -> Result<()> {
        self.add_file(path, content)
    }

    /// Wrap this filesystem in a shared handle
    pub fn into_shared(self) -> FsRef {
        Arc::new(self)
    }
}

impl FileSystem for MemoryFS {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| Error::Filesystem {
                path: path.display().to_string(),
                message: "file not found".to_string(),
            })
    }

    fn is_dir(&self, path: &Path) -> bool {
        let dir = normalize(path);
        if dir.as_os_str().is_empty() || dir == Path::new("/") {
            return true;
        }
        self.files
            .keys()
            .any(|file| file != &dir && file.starts_with(&dir))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(&normalize(path)) || self.is_dir(path)
    }
}

/// A filesystem view with relative paths resolved against a working
/// directory of an underlying filesystem.
///
/// Absolute paths are passed through unchanged. Relative working
/// directories are themselves resolved by the underlying filesystem, so
/// nested views compose.
#[derive(Debug, Clone)]
pub struct WorkDirFS {
    base: FsRef,
    dir: PathBuf,
}

impl WorkDirFS {
    /// Scope `base` to the working directory `dir`.
    ///
    /// Fails if `dir` is not a directory on `base`.
    pub fn new<P: AsRef<Path>>(base: FsRef, dir: P) -> Result<Self> {
        let dir = normalize(dir);
        if !base.is_dir(&dir) {
            let message = if base.exists(&dir) {
                "cannot set working directory: not a directory"
            } else {
                "cannot set working directory: no such directory"
            };
            return Err(Error::Filesystem {
                path: dir.display().to_string(),
                message: message.to_string(),
            });
        }
        Ok(Self { base, dir })
    }

    /// The working directory of this view
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Map a path of this view to a path of the underlying filesystem
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize(path)
        } else {
            normalize(self.dir.join(path))
        }
    }
}

impl FileSystem for WorkDirFS {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.base.read(&self.resolve(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.base.is_dir(&self.resolve(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.base.exists(&self.resolve(path))
    }
}
