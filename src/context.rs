//! Ambient data context
//!
//! A [`DataContext`] carries named attributes shared by several requests,
//! most importantly the filesystem they should resolve files against.

use crate::error::{Error, Result};
use crate::filesystem::{FsRef, OsFS};
use std::collections::HashMap;
use std::fmt::Debug;

/// Attribute key under which a context stores its filesystem
pub const ATTR_FILESYSTEM: &str = "filesystem";

/// Something a filesystem can be derived from
pub trait ContextProvider: Debug + Send + Sync {
    fn filesystem(&self) -> Result<FsRef>;
}

/// A value stored in a [`DataContext`]
#[derive(Debug, Clone)]
pub enum Attribute {
    FileSystem(FsRef),
    Text(String),
}

/// Attribute store for ambient settings
#[derive(Debug, Clone, Default)]
pub struct DataContext {
    attributes: HashMap<String, Attribute>,
}

impl DataContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, attribute: Attribute) -> &mut Self {
        self.attributes.insert(key.into(), attribute);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.get(key)
    }

    /// Context whose filesystem attribute is `fs`
    pub fn with_filesystem(fs: FsRef) -> Self {
        let mut ctx = Self::new();
        ctx.set_attribute(ATTR_FILESYSTEM, Attribute::FileSystem(fs));
        ctx
    }
}

impl ContextProvider for DataContext {
    /// The filesystem attribute, or the process filesystem when unset.
    fn filesystem(&self) -> Result<FsRef> {
        match self.attribute(ATTR_FILESYSTEM) {
            None => Ok(OsFS::shared()),
            Some(Attribute::FileSystem(fs)) => Ok(fs.clone()),
            Some(other) => Err(Error::Context {
                message: format!(
                    "attribute {} holds {:?}, not a filesystem",
                    ATTR_FILESYSTEM, other
                ),
            }),
        }
    }
}
