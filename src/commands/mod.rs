//! # CLI Command Implementations
//!
//! Each subcommand of `spiff-request` lives in its own module with:
//! - An `Args` struct derived with `clap`.
//! - An `execute` function that performs the command by calling into the
//!   `spiff_request` library.

pub mod assemble;
pub mod validate;
