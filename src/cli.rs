//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Spiff Request - Assemble and validate spiff template merge requests
#[derive(Parser, Debug)]
#[command(name = "spiff-request")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a request from a template, stubs and values and print a summary
    Assemble(commands::assemble::AssembleArgs),

    /// Validate YAML or JSON documents against a schema
    Validate(commands::validate::ValidateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Assemble(args) => commands::assemble::execute(args, &self.color),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
        }
    }
}

/// Initialise `env_logger`; `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
