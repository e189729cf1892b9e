//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `agent-managed-files` command-line tool. Each subcommand is defined in its
//! own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! `sync` and `check` share their options through [`RunArgs`], which also
//! knows how to turn them into a ready-to-run [`RunContext`].

pub mod check;
pub mod completions;
pub mod sync;

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use agent_managed_files::defaults;
use agent_managed_files::engine::{RunContext, RunOptions};
use agent_managed_files::git;
use agent_managed_files::http::RemoteFetcher;
use agent_managed_files::manifest;
use agent_managed_files::profiles::parse_profile_list;
use agent_managed_files::suggestions;

/// Options shared by `sync` and `check`
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to the managed-files manifest, relative to the repository root.
    #[arg(short, long, value_name = "FILE", default_value = defaults::MANIFEST_PATH)]
    pub manifest: PathBuf,

    /// Fetch template files from the remote repository even when a local
    /// template checkout is available.
    #[arg(long)]
    pub prefer_remote: bool,

    /// Comma-separated list of profiles to activate, replacing the
    /// manifest's `profiles`.
    #[arg(long, value_name = "LIST")]
    pub profiles: Option<String>,

    /// Repository root. Defaults to the enclosing git work tree, or the
    /// current directory outside of one.
    #[arg(long, value_name = "DIR")]
    pub repo_root: Option<PathBuf>,

    /// Local template directory, overriding the manifest's `template.localPath`.
    #[arg(long, value_name = "DIR", env = defaults::LOCAL_PATH_ENV)]
    pub template_path: Option<String>,

    /// Timeout for each remote request, in seconds.
    #[arg(long, value_name = "SECS", env = defaults::TIMEOUT_ENV, default_value_t = defaults::TIMEOUT_SECS)]
    pub timeout: u64,

    /// Maximum number of redirects followed per remote file.
    #[arg(long, value_name = "N", default_value_t = defaults::MAX_REDIRECTS)]
    pub max_redirects: usize,
}

impl RunArgs {
    /// Locate the repository, load the manifest and build the run context.
    pub fn context(&self) -> Result<RunContext> {
        let cwd = std::env::current_dir()?;
        let repo_root = match &self.repo_root {
            Some(dir) => cwd.join(dir),
            None => git::repo_root(&cwd),
        };

        let manifest = manifest::from_file(&repo_root.join(&self.manifest))
            .map_err(suggestions::with_hint)?;

        let fetcher = RemoteFetcher::new(Duration::from_secs(self.timeout), self.max_redirects)?;

        let options = RunOptions {
            prefer_remote: self.prefer_remote,
            profiles: self
                .profiles
                .as_deref()
                .map(parse_profile_list)
                .unwrap_or_default(),
            local_path_override: self.template_path.clone(),
        };

        Ok(RunContext::new(&repo_root, manifest, &options, fetcher))
    }
}
