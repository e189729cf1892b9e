//! # Agent Managed Files CLI
//!
//! This is the binary entry point for the `agent-managed-files` command-line
//! tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and output preferences.
//! - Executing the selected command and translating failures into a printed
//!   diagnostic and a non-zero exit status.
//!
//! The sync and drift-check logic lives in the library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
