//! # Agent Managed Files Library
//!
//! This library keeps a set of *managed files* in a repository synchronized
//! with a project template. It is designed to be used by the
//! `agent-managed-files` command-line tool, typically from a pre-commit hook
//! or a CI drift gate.
//!
//! ## Quick Example
//!
//! ```
//! use agent_managed_files::manifest;
//! use agent_managed_files::profiles::{is_entry_active, resolve_active_profiles};
//!
//! let json = r#"{
//!     "profiles": ["base"],
//!     "managed_files": [
//!         { "path": "README.md" },
//!         { "path": "package.json", "profiles": ["node-web"] }
//!     ]
//! }"#;
//! let manifest = manifest::parse(json, ".agent-managed.json").unwrap();
//!
//! let active = resolve_active_profiles(&manifest, &[]);
//! assert!(is_entry_active(&manifest.managed_files[0], &active));
//! assert!(!is_entry_active(&manifest.managed_files[1], &active));
//! ```
//!
//! ## Core Concepts
//!
//! - **Manifest (`manifest`)**: the JSON file listing managed files, the
//!   profiles that activate them and where the template lives.
//! - **Profiles (`profiles`)**: named selectors choosing which entries take
//!   part in a run.
//! - **Template source (`source`)**: a local template directory, a hosted
//!   repository, or both, resolved once per run.
//! - **Content resolution (`content`, `http`, `cache`)**: override files win
//!   over local template files, which win over remote files; remote files are
//!   fetched over HTTPS with redirect following and cached for the run.
//! - **Engine (`engine`)**: `sync` writes expected content to disk, `check`
//!   reports drift without writing.
//!
//! ## Execution Flow
//!
//! 1.  Locate the repository root (`git`).
//! 2.  Load and validate the manifest.
//! 3.  Resolve the active profiles and the template source.
//! 4.  For each active entry, in manifest order, resolve its expected content.
//! 5.  Compare with the file on disk and either write it (`sync`) or record a
//!     mismatch (`check`).

pub mod cache;
pub mod content;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod git;
pub mod http;
pub mod manifest;
pub mod output;
pub mod path;
pub mod profiles;
pub mod source;
pub mod suggestions;

#[cfg(test)]
mod path_proptest;
