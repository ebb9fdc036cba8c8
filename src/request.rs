//! The rendering request assembled by options
//!
//! A [`Request`] is the mutable configuration handed to the render engine:
//! the filesystem that file sources resolve against, parameter values, custom
//! functions, a single template and an ordered list of stubs. Later stubs
//! override earlier ones during the merge.
//!
//! Cloning a request is shallow: the filesystem and the function table are
//! shared, which is what the shadow copy of `validated` relies on.

use crate::filesystem::{FsRef, OsFS};
use crate::functions::Functions;
use crate::source::Source;
use serde_yaml::Value;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Render mode flags, passed through to the render engine
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode(u32);

impl Mode {
    /// Hide the processing environment from templates
    pub const PRIVATE: Mode = Mode(1);
    /// Allow access to the operating system (env, exec)
    pub const OS_ACCESS: Mode = Mode(2);
    /// Allow templates to read files
    pub const FILE_ACCESS: Mode = Mode(4);
    pub const DEFAULT: Mode = Mode(Self::OS_ACCESS.0 | Self::FILE_ACCESS.0);

    const KNOWN: u32 = Self::PRIVATE.0 | Self::OS_ACCESS.0 | Self::FILE_ACCESS.0;

    pub const fn from_bits(bits: u32) -> Self {
        Mode(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Mode) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::DEFAULT
    }
}

impl BitOr for Mode {
    type Output = Mode;

    fn bitor(self, rhs: Mode) -> Mode {
        Mode(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mode {
    fn bitor_assign(&mut self, rhs: Mode) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(Mode::PRIVATE) {
            flags.push("private".to_string());
        }
        if self.contains(Mode::OS_ACCESS) {
            flags.push("os-access".to_string());
        }
        if self.contains(Mode::FILE_ACCESS) {
            flags.push("file-access".to_string());
        }
        // Bits the render engine may define beyond the known flags.
        let unknown = self.0 & !Self::KNOWN;
        if unknown != 0 {
            flags.push(format!("{:#x}", unknown));
        }
        if flags.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mode({:#x}: {})", self.0, self)
    }
}

/// Configuration of a single template merge
#[derive(Debug, Clone)]
pub struct Request {
    pub filesystem: FsRef,
    /// Parameter values made available to the template
    pub values: Value,
    pub functions: Functions,
    /// Key selecting the sub-node of the document that receives `values`
    pub values_node: Option<String>,
    pub template: Option<Source>,
    /// Overlays, in increasing precedence
    pub stubs: Vec<Source>,
    pub mode: Mode,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            filesystem: OsFS::shared(),
            values: Value::Null,
            functions: Functions::default(),
            values_node: None,
            template: None,
            stubs: Vec::new(),
            mode: Mode::DEFAULT,
        }
    }
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the configured stubs, in merge order
    pub fn stub_names(&self) -> Vec<&str> {
        self.stubs.iter().map(Source::name).collect()
    }

    /// A copy sharing filesystem, values, functions and mode, but with no
    /// template and no stubs.
    pub(crate) fn shadow(&self) -> Self {
        Self {
            template: None,
            stubs: Vec::new(),
            ..self.clone()
        }
    }
}
