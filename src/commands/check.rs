//! # Check Command Implementation
//!
//! This module implements the `check` subcommand, a read-only drift gate
//! for pre-commit hooks and CI.
//!
//! Every active managed file is compared byte-for-byte with its expected
//! content. All mismatches are listed, each with the reason (`content
//! differs` or `missing target file`) and the source the expected content
//! came from, before the command fails. Nothing is written.

use anyhow::Result;
use clap::Args;

use agent_managed_files::output::{Marker, OutputConfig};
use agent_managed_files::suggestions;

use super::RunArgs;

/// Report drift between managed files and the template
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

/// Execute the `check` command.
pub fn execute(args: CheckArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let mut ctx = args.run.context()?;

    if ctx.active_entries().is_empty() {
        println!("No managed files selected for active profiles; nothing to do.");
        return Ok(());
    }

    let report = ctx.check().map_err(suggestions::with_hint)?;

    if !report.passed() {
        eprintln!("{} Managed file drift detected:", out.marker(Marker::Drift));
        for mismatch in &report.mismatches {
            eprintln!(
                "- {}: {} (expected from {})",
                out.path(&mismatch.path),
                mismatch.reason.as_str(),
                out.source(&mismatch.expected_source.to_string())
            );
        }
        return Err(suggestions::drift_detected(report.mismatches.len()));
    }

    println!(
        "{} Managed file drift check passed ({} files).",
        out.marker(Marker::Ok),
        report.checked
    );

    Ok(())
}
