//! # Spiff Request CLI
//!
//! This is the binary entry point for the `spiff-request` command-line tool.
//!
//! Its responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Initialising logging.
//! - Dispatching to the selected subcommand and turning library errors into
//!   a non-zero exit status.
//!
//! Request assembly and validation live in the `spiff_request` library; the
//! binary is a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
