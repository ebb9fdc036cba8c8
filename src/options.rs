//! Options that assemble a [`Request`]
//!
//! Every configuration step is a [`RequestOption`]: a tagged value that
//! knows how to apply itself to a request or fail. Options are grouped in an
//! ordered [`Options`] list, which is itself applicable, so lists nest.
//!
//! ## Application
//!
//! Options apply strictly in order and stop at the first error. Earlier
//! options keep their effect on the request when a later one fails; there is
//! no rollback. The only exception is [`validated`]: it first applies its
//! inner options to a shadow copy of the request, validates the resulting
//! template and stubs against a schema, and only then applies the same
//! options to the real request. If anything fails before that second pass
//! the real request is left untouched.
//!
//! ## Ordering
//!
//! [`work_dir`] scopes whatever filesystem is current when it applies, so it
//! belongs after [`file_system`]/[`context`] and before the [`stub_file`] and
//! [`template_file`] options that should resolve relative to it. Stubs are
//! appended in application order; later stubs take precedence during merge.
//!
//! ## Example
//!
//! ```
//! use spiff_request::filesystem::MemoryFS;
//! use spiff_request::options::{self, get_request};
//!
//! let mut fs = MemoryFS::new();
//! fs.add_file_string("/app/tmpl.yaml", "name: (( values.name ))").unwrap();
//!
//! let request = get_request([
//!     options::file_system(fs.into_shared()),
//!     options::work_dir("/app"),
//!     options::template_file("tmpl.yaml"),
//!     options::stub_data("defaults", "name: demo"),
//! ])
//! .unwrap();
//!
//! assert_eq!(request.template.unwrap().name(), "tmpl.yaml");
//! assert_eq!(request.stubs.len(), 1);
//! ```

use crate::context::ContextProvider;
use crate::error::{Error, Result};
use crate::filesystem::{FsRef, WorkDirFS};
use crate::functions::Functions;
use crate::request::{Mode, Request};
use crate::source::Source;
use crate::validate::{JsonSchemaValidator, SchemaValidator};
use log::debug;
use serde_yaml::Value;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Anything that can configure a [`Request`]
pub trait ApplyToRequest {
    fn apply_to_request(&self, request: &mut Request) -> Result<()>;
}

/// Closure adapted into an option
pub type OptionFn = Arc<dyn Fn(&mut Request) -> Result<()> + Send + Sync>;

/// A single configuration step for a [`Request`]
#[derive(Clone)]
pub enum RequestOption {
    /// Replace the request filesystem
    FileSystem(FsRef),
    /// Replace the request filesystem with the one derived from a context
    Context(Arc<dyn ContextProvider>),
    /// Scope the current request filesystem to a working directory
    WorkDir(PathBuf),
    Values(Value),
    Functions(Functions),
    ValuesNode(String),
    Mode(Mode),
    /// Append an inline stub; empty data is skipped
    StubData { name: String, data: Vec<u8> },
    /// Set an inline template; empty data is an error
    TemplateData { name: String, data: Vec<u8> },
    /// Append a file-backed stub
    StubFile {
        path: PathBuf,
        filesystems: Vec<FsRef>,
    },
    /// Set a file-backed template
    TemplateFile {
        path: PathBuf,
        filesystems: Vec<FsRef>,
    },
    /// Nested option list
    Options(Options),
    /// Options whose sources must conform to a schema before they commit
    Validated {
        schema: Vec<u8>,
        validator: Arc<dyn SchemaValidator>,
        options: Options,
    },
    /// Arbitrary closure
    Custom(OptionFn),
}

impl RequestOption {
    /// Short name of the option kind, used for logging
    pub fn kind(&self) -> &'static str {
        match self {
            RequestOption::FileSystem(_) => "filesystem",
            RequestOption::Context(_) => "context",
            RequestOption::WorkDir(_) => "workdir",
            RequestOption::Values(_) => "values",
            RequestOption::Functions(_) => "functions",
            RequestOption::ValuesNode(_) => "values-node",
            RequestOption::Mode(_) => "mode",
            RequestOption::StubData { .. } => "stub-data",
            RequestOption::TemplateData { .. } => "template-data",
            RequestOption::StubFile { .. } => "stub-file",
            RequestOption::TemplateFile { .. } => "template-file",
            RequestOption::Options(_) => "options",
            RequestOption::Validated { .. } => "validated",
            RequestOption::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for RequestOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestOption::FileSystem(fs) => f.debug_tuple("FileSystem").field(fs).finish(),
            RequestOption::Context(ctx) => f.debug_tuple("Context").field(ctx).finish(),
            RequestOption::WorkDir(path) => f.debug_tuple("WorkDir").field(path).finish(),
            RequestOption::Values(values) => f.debug_tuple("Values").field(values).finish(),
            RequestOption::Functions(functions) => {
                f.debug_tuple("Functions").field(functions).finish()
            }
            RequestOption::ValuesNode(node) => f.debug_tuple("ValuesNode").field(node).finish(),
            RequestOption::Mode(mode) => f.debug_tuple("Mode").field(mode).finish(),
            RequestOption::StubData { name, data } => f
                .debug_struct("StubData")
                .field("name", name)
                .field("len", &data.len())
                .finish(),
            RequestOption::TemplateData { name, data } => f
                .debug_struct("TemplateData")
                .field("name", name)
                .field("len", &data.len())
                .finish(),
            RequestOption::StubFile { path, .. } => {
                f.debug_struct("StubFile").field("path", path).finish()
            }
            RequestOption::TemplateFile { path, .. } => {
                f.debug_struct("TemplateFile").field("path", path).finish()
            }
            RequestOption::Options(options) => f.debug_tuple("Options").field(options).finish(),
            RequestOption::Validated {
                schema,
                validator,
                options,
            } => f
                .debug_struct("Validated")
                .field("schema_len", &schema.len())
                .field("validator", validator)
                .field("options", options)
                .finish(),
            RequestOption::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl ApplyToRequest for RequestOption {
    fn apply_to_request(&self, r: &mut Request) -> Result<()> {
        debug!("applying {} option", self.kind());
        match self {
            RequestOption::FileSystem(fs) => {
                r.filesystem = fs.clone();
            }
            RequestOption::Context(ctx) => {
                r.filesystem = ctx.filesystem()?;
            }
            RequestOption::WorkDir(path) => {
                let fs = WorkDirFS::new(r.filesystem.clone(), path)?;
                r.filesystem = Arc::new(fs);
            }
            RequestOption::Values(values) => {
                r.values = values.clone();
            }
            RequestOption::Functions(functions) => {
                r.functions = functions.clone();
            }
            RequestOption::ValuesNode(node) => {
                r.values_node = Some(node.clone());
            }
            RequestOption::Mode(mode) => {
                r.mode = *mode;
            }
            RequestOption::StubData { name, data } => {
                if data.is_empty() {
                    debug!("skipping empty stub {}", name);
                } else {
                    r.stubs.push(Source::from_data(name.clone(), data.clone()));
                }
            }
            RequestOption::TemplateData { name, data } => {
                if data.is_empty() {
                    return Err(Error::EmptyInput { name: name.clone() });
                }
                r.template = Some(Source::from_data(name.clone(), data.clone()));
            }
            RequestOption::StubFile { path, filesystems } => {
                let fs = select_filesystem(filesystems, r);
                r.stubs.push(Source::from_file(path, fs));
            }
            RequestOption::TemplateFile { path, filesystems } => {
                let fs = select_filesystem(filesystems, r);
                r.template = Some(Source::from_file(path, fs));
            }
            RequestOption::Options(options) => options.apply_to_request(r)?,
            RequestOption::Validated {
                schema,
                validator,
                options,
            } => apply_validated(schema, validator.as_ref(), options, r)?,
            RequestOption::Custom(function) => function(r)?,
        }
        Ok(())
    }
}

/// The first caller supplied filesystem, or the request's current one
fn select_filesystem(filesystems: &[FsRef], r: &Request) -> FsRef {
    filesystems
        .first()
        .cloned()
        .unwrap_or_else(|| r.filesystem.clone())
}

/// Apply `options` to a shadow of `r`, validate the sources it ends up with,
/// then apply `options` to `r` itself.
///
/// `r` is only touched by the final pass, so it is unchanged whenever an
/// error is returned before it.
fn apply_validated(
    schema: &[u8],
    validator: &dyn SchemaValidator,
    options: &Options,
    r: &mut Request,
) -> Result<()> {
    let mut shadow = r.shadow();
    options.apply_to_request(&mut shadow)?;

    if let Some(template) = &shadow.template {
        validate_source(validator, "template", template, schema)?;
    }
    for stub in &shadow.stubs {
        validate_source(validator, "stub", stub, schema)?;
    }

    debug!(
        "validated {} source(s), committing options",
        usize::from(shadow.template.is_some()) + shadow.stubs.len()
    );
    options.apply_to_request(r)
}

fn validate_source(
    validator: &dyn SchemaValidator,
    kind: &str,
    source: &Source,
    schema: &[u8],
) -> Result<()> {
    source
        .data()
        .and_then(|data| validator.validate(&data, schema))
        .map_err(|e| Error::SchemaValidation {
            kind: kind.to_string(),
            name: source.name().to_string(),
            source: Box::new(e),
        })
}

/// Ordered list of options, applied in sequence with fail-fast semantics
#[derive(Debug, Clone, Default)]
pub struct Options(Vec<RequestOption>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an option; `None` is dropped.
    pub fn add(&mut self, option: impl Into<Option<RequestOption>>) -> &mut Self {
        if let Some(option) = option.into() {
            self.0.push(option);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RequestOption> {
        self.0.iter()
    }
}

impl ApplyToRequest for Options {
    fn apply_to_request(&self, r: &mut Request) -> Result<()> {
        for option in &self.0 {
            option.apply_to_request(r)?;
        }
        Ok(())
    }
}

impl FromIterator<RequestOption> for Options {
    fn from_iter<I: IntoIterator<Item = RequestOption>>(iter: I) -> Self {
        Options(iter.into_iter().collect())
    }
}

impl FromIterator<Option<RequestOption>> for Options {
    fn from_iter<I: IntoIterator<Item = Option<RequestOption>>>(iter: I) -> Self {
        Options(iter.into_iter().flatten().collect())
    }
}

impl From<Vec<RequestOption>> for Options {
    fn from(options: Vec<RequestOption>) -> Self {
        Options(options)
    }
}

impl From<Options> for RequestOption {
    fn from(options: Options) -> Self {
        RequestOption::Options(options)
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = &'a RequestOption;
    type IntoIter = std::slice::Iter<'a, RequestOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build a default request and apply `options` to it.
pub fn get_request(options: impl IntoIterator<Item = RequestOption>) -> Result<Request> {
    let mut request = Request::default();
    Options::from_iter(options).apply_to_request(&mut request)?;
    Ok(request)
}

pub fn file_system(fs: FsRef) -> RequestOption {
    RequestOption::FileSystem(fs)
}

/// Use the filesystem of an ambient context. The lookup happens when the
/// option is applied and its failure is returned unchanged.
pub fn context(ctx: Arc<dyn ContextProvider>) -> RequestOption {
    RequestOption::Context(ctx)
}

/// Scope the current filesystem to the working directory `path`.
///
/// Fails with [`Error::Filesystem`] if `path` is not a directory; the request
/// filesystem is unchanged in that case.
pub fn work_dir(path: impl Into<PathBuf>) -> RequestOption {
    RequestOption::WorkDir(path.into())
}

pub fn values(values: impl Into<Value>) -> RequestOption {
    RequestOption::Values(values.into())
}

pub fn functions(functions: Functions) -> RequestOption {
    RequestOption::Functions(functions)
}

pub fn values_node(name: impl Into<String>) -> RequestOption {
    RequestOption::ValuesNode(name.into())
}

pub fn mode(mode: Mode) -> RequestOption {
    RequestOption::Mode(mode)
}

/// Append an inline stub. Empty data is silently skipped.
pub fn stub_data(name: impl Into<String>, data: impl Into<Vec<u8>>) -> RequestOption {
    RequestOption::StubData {
        name: name.into(),
        data: data.into(),
    }
}

/// Set an inline template. Empty data fails with [`Error::EmptyInput`].
pub fn template_data(name: impl Into<String>, data: impl Into<Vec<u8>>) -> RequestOption {
    RequestOption::TemplateData {
        name: name.into(),
        data: data.into(),
    }
}

/// Append a stub read from `path` on the request filesystem current at
/// application time.
pub fn stub_file(path: impl Into<PathBuf>) -> RequestOption {
    stub_file_from(path, Vec::new())
}

/// Append a stub read from `path` on the first of `filesystems`, falling
/// back to the request filesystem when none is given.
pub fn stub_file_from(path: impl Into<PathBuf>, filesystems: Vec<FsRef>) -> RequestOption {
    RequestOption::StubFile {
        path: path.into(),
        filesystems,
    }
}

/// Set the template to `path` on the request filesystem current at
/// application time.
pub fn template_file(path: impl Into<PathBuf>) -> RequestOption {
    template_file_from(path, Vec::new())
}

/// Like [`stub_file_from`], for the template.
pub fn template_file_from(path: impl Into<PathBuf>, filesystems: Vec<FsRef>) -> RequestOption {
    RequestOption::TemplateFile {
        path: path.into(),
        filesystems,
    }
}

/// Adapt a closure into an option.
pub fn option_fn<F>(function: F) -> RequestOption
where
    F: Fn(&mut Request) -> Result<()> + Send + Sync + 'static,
{
    RequestOption::Custom(Arc::new(function))
}

/// Apply `options` only if every template and stub they produce conforms to
/// `schema`, using the built-in [`JsonSchemaValidator`].
///
/// With an empty schema this is a plain option list.
pub fn validated(
    schema: impl Into<Vec<u8>>,
    options: impl IntoIterator<Item = RequestOption>,
) -> RequestOption {
    validated_with(Arc::new(JsonSchemaValidator), schema, options)
}

/// [`validated`] with a caller supplied validator.
///
/// The inner options run twice, once against a shadow copy and once against
/// the real request, so they must not have side effects beyond assigning
/// request fields.
pub fn validated_with(
    validator: Arc<dyn SchemaValidator>,
    schema: impl Into<Vec<u8>>,
    options: impl IntoIterator<Item = RequestOption>,
) -> RequestOption {
    let schema = schema.into();
    let options = Options::from_iter(options);
    if schema.is_empty() {
        return RequestOption::Options(options);
    }
    RequestOption::Validated {
        schema,
        validator,
        options,
    }
}
