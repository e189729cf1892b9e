//! # Sync Command Implementation
//!
//! This module implements the `sync` subcommand, which materializes the
//! expected content of every active managed file onto disk.
//!
//! Files whose content already matches the template are left untouched, so
//! running `sync` repeatedly is a no-op once the repository is up to date.
//! Each written file is reported together with the source it came from
//! (override, local template or remote template).

use anyhow::Result;
use clap::Args;

use agent_managed_files::output::{Marker, OutputConfig};
use agent_managed_files::suggestions;

use super::RunArgs;

/// Write managed files from the template
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

/// Execute the `sync` command.
pub fn execute(args: SyncArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let mut ctx = args.run.context()?;

    if ctx.active_entries().is_empty() {
        println!("No managed files selected for active profiles; nothing to do.");
        return Ok(());
    }

    let report = ctx
        .sync_with(|path, source| {
            println!(
                "{} synced {} <- {}",
                out.marker(Marker::Synced),
                out.path(path),
                out.source(&source.to_string())
            );
        })
        .map_err(suggestions::with_hint)?;

    println!(
        "{} Managed file sync complete. Updated: {}, unchanged: {}.",
        out.marker(Marker::Ok),
        report.updated.len(),
        report.unchanged
    );

    Ok(())
}
