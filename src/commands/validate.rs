//! # Validate Command Implementation
//!
//! Checks YAML or JSON documents against a schema without assembling a full
//! request. Each document goes through the same validated option path the
//! `assemble --schema` command uses, so the reported errors match.
//!
//! This command is read-only. It exits non-zero if any document fails.

use anyhow::{Context as _, Result};
use clap::Args;
use std::path::PathBuf;

use spiff_request::options::{self, get_request};
use spiff_request::output::OutputConfig;

/// Validate documents against a schema
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON Schema file, written in YAML or JSON
    #[arg(short, long, value_name = "FILE", env = "SPIFF_REQUEST_SCHEMA")]
    pub schema: PathBuf,

    /// Documents to validate
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,
}

/// Execute the validate command
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let schema = std::fs::read(&args.schema)
        .with_context(|| format!("cannot read schema {}", args.schema.display()))?;
    if schema.is_empty() {
        anyhow::bail!("schema {} is empty", args.schema.display());
    }

    let mut failed = 0;
    for file in &args.files {
        let result = get_request([options::validated(
            schema.clone(),
            [options::stub_file(file)],
        )]);
        match result {
            Ok(_) => println!("{} {}", out.ok(), file.display()),
            Err(e) => {
                failed += 1;
                println!("{} {}", out.err(), e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} document(s) failed validation", failed, args.files.len());
    }
    Ok(())
}
