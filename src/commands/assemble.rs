//! # Assemble Command Implementation
//!
//! Builds a request from command-line arguments through the option API and
//! prints what the render engine would receive:
//!
//! 1. Filesystem: the process filesystem, optionally scoped with `--workdir`.
//! 2. Template and stubs, in the order given. Stub arguments may be globs.
//! 3. Values, values node and render mode.
//! 4. With `--schema`, template and stubs are validated before they are
//!    added to the request.
//!
//! Repository coordinates and the user name come from `--config`, or from
//! the default config file when that exists.
//!
//! Every source is resolved once so unreadable files are reported here
//! rather than by the render engine.

use anyhow::{Context as _, Result};
use clap::Args;
use log::{debug, info};
use std::path::{Path, PathBuf};

use spiff_request::config::{default_config_path, read_config, Config};
use spiff_request::options::{self, get_request, RequestOption};
use spiff_request::output::OutputConfig;
use spiff_request::{Mode, Request};

/// Arguments for the assemble command
#[derive(Args, Debug)]
pub struct AssembleArgs {
    /// Template document
    #[arg(short, long, value_name = "FILE")]
    pub template: PathBuf,

    /// Stub document or glob; may be repeated, later stubs take precedence
    #[arg(short, long, value_name = "FILE|GLOB")]
    pub stub: Vec<String>,

    /// YAML file with parameter values
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,

    /// Document node that receives the values
    #[arg(long, value_name = "KEY")]
    pub values_node: Option<String>,

    /// Working directory for relative template and stub paths
    #[arg(short = 'C', long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Schema that template and stubs must conform to
    #[arg(long, value_name = "FILE", env = "SPIFF_REQUEST_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Render mode bits (1 private, 2 os access, 4 file access)
    #[arg(long, value_name = "BITS")]
    pub mode: Option<u32>,

    /// Repository config file with credentials and component coordinates;
    /// falls back to <config dir>/spiff-request/config.yaml when present
    #[arg(long, value_name = "FILE", env = "SPIFF_REQUEST_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Execute the assemble command
pub fn execute(args: AssembleArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    let mut opts = options::Options::new();

    let config = match config_path(args.config.as_deref()) {
        Some(path) => {
            info!("using config file {}", path.display());
            Some(read_config(&path)?)
        }
        None => None,
    };

    if let Some(dir) = &args.workdir {
        opts.add(options::work_dir(dir));
    }

    if let Some(path) = &args.values {
        let data = std::fs::read(path)
            .with_context(|| format!("cannot read values file {}", path.display()))?;
        let values: serde_yaml::Value = serde_yaml::from_slice(&data)
            .with_context(|| format!("cannot parse values file {}", path.display()))?;
        opts.add(options::values(values));
    }
    opts.add(args.values_node.clone().map(|node| options::values_node(node)));
    opts.add(args.mode.map(|bits| options::mode(Mode::from_bits(bits))));

    let mut sources = vec![options::template_file(&args.template)];
    for pattern in &args.stub {
        for path in expand_stub(pattern, args.workdir.as_deref())? {
            debug!("stub {}", path.display());
            sources.push(options::stub_file(path));
        }
    }

    match &args.schema {
        Some(schema_path) => {
            let schema = std::fs::read(schema_path)
                .with_context(|| format!("cannot read schema {}", schema_path.display()))?;
            info!("validating sources against {}", schema_path.display());
            opts.add(options::validated(schema, sources));
        }
        None => {
            for source in sources {
                opts.add(source);
            }
        }
    }

    let request = get_request([RequestOption::from(opts)])?;
    print_summary(&request, config.as_ref(), &out)
}

/// The explicit config file, else the default one if it exists
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let path = default_config_path();
            if path.is_file() {
                Some(path)
            } else {
                debug!("no config file at {}", path.display());
                None
            }
        }
    }
}

/// Expand a stub argument. Arguments without glob characters are kept as
/// given; globs are matched on disk, relative to `workdir` when set, and
/// reported relative to it.
fn expand_stub(pattern: &str, workdir: Option<&Path>) -> Result<Vec<PathBuf>> {
    if !pattern.contains(['*', '?', '[']) {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let full = match workdir {
        Some(dir) if Path::new(pattern).is_relative() => dir.join(pattern),
        _ => PathBuf::from(pattern),
    };
    let mut matches = Vec::new();
    for entry in glob::glob(&full.to_string_lossy())? {
        let path = entry?;
        let path = match workdir {
            Some(dir) => path
                .strip_prefix(dir)
                .map(Path::to_path_buf)
                .unwrap_or(path),
            None => path,
        };
        matches.push(path);
    }
    if matches.is_empty() {
        anyhow::bail!("stub pattern {} matched no files", pattern);
    }
    Ok(matches)
}

fn print_summary(request: &Request, config: Option<&Config>, out: &OutputConfig) -> Result<()> {
    println!("{}", out.heading("Request"));
    if let Some(config) = config {
        if !config.component.is_empty() {
            println!("  component:   {}:{}", config.component, config.version);
        }
        if !config.repository.is_empty() {
            println!("  repository:  {}", config.repository);
        }
        let credentials = config.credentials();
        if let Some(user) = credentials.username().filter(|u| !u.is_empty()) {
            let auth = match credentials.password() {
                Some(p) if !p.is_empty() => "password",
                _ => "no password",
            };
            println!("  user:        {} ({})", user, auth);
        }
    }

    if let Some(template) = &request.template {
        let data = template.data()?;
        println!("  template:    {} ({} bytes)", template.name(), data.len());
    }
    for (idx, stub) in request.stubs.iter().enumerate() {
        let data = stub.data()?;
        println!("  stub[{}]:     {} ({} bytes)", idx, stub.name(), data.len());
    }
    if !request.values.is_null() {
        let keys = match request.values.as_mapping() {
            Some(mapping) => mapping.len(),
            None => 1,
        };
        println!("  values:      {} entries", keys);
    }
    if let Some(node) = &request.values_node {
        println!("  values node: {}", node);
    }
    println!("  mode:        {}", request.mode);
    println!("{} request assembled", out.ok());
    Ok(())
}
