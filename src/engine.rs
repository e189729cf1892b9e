//! # Sync/Check Engine
//!
//! Orchestrates a single run over the manifest. A `RunContext` is built once
//! from the repository root, the loaded manifest and the run options; it owns
//! the resolved template source, the active profile set, the remote cache
//! and the fetcher for the whole invocation.
//!
//! ## Modes
//!
//! - **check**: resolves the expected content of every active entry and
//!   compares it byte-for-byte with the file on disk. Every mismatch is
//!   collected; nothing is written.
//! - **sync**: resolves the expected content of every active entry and
//!   writes it when the file on disk differs, creating parent directories as
//!   needed. Files that already match are left alone, so repeated syncs are
//!   no-ops.
//!
//! Entries are processed in manifest order. The first error aborts the run;
//! files written earlier in the same sync stay written.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::cache::RemoteCache;
use crate::content::{resolve_expected_content, ContentSource, ResolvedContent};
use crate::defaults;
use crate::error::Result;
use crate::http::RemoteFetcher;
use crate::manifest::{ManagedFileEntry, Manifest};
use crate::profiles::{is_entry_active, resolve_active_profiles, ActiveProfiles};
use crate::source::{resolve_template_source, TemplateSource};

/// Caller-supplied options for a run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Skip the local template even when it is available.
    pub prefer_remote: bool,
    /// Profiles selected on the command line. Empty defers to the manifest.
    pub profiles: Vec<String>,
    /// Local template path taking precedence over the manifest's.
    pub local_path_override: Option<String>,
}

/// Why a managed file failed the drift check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchReason {
    ContentDiffers,
    MissingTarget,
}

impl MismatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MismatchReason::ContentDiffers => "content differs",
            MismatchReason::MissingTarget => "missing target file",
        }
    }
}

/// A managed file whose on-disk content does not match the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub path: String,
    pub reason: MismatchReason,
    pub expected_source: ContentSource,
}

/// Result of a check run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Number of active entries compared.
    pub checked: usize,
    pub mismatches: Vec<Mismatch>,
}

impl CheckReport {
    /// True when every checked file matched.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Result of a sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Paths written, in processing order.
    pub updated: Vec<String>,
    pub unchanged: usize,
}

/// Everything a single run needs, passed explicitly.
pub struct RunContext {
    repo_root: PathBuf,
    manifest: Manifest,
    source: TemplateSource,
    override_root: String,
    active_profiles: ActiveProfiles,
    cache: RemoteCache,
    fetcher: RemoteFetcher,
}

impl RunContext {
    /// Resolve profiles and the template source for a run.
    pub fn new(
        repo_root: &Path,
        manifest: Manifest,
        options: &RunOptions,
        fetcher: RemoteFetcher,
    ) -> Self {
        let active_profiles = resolve_active_profiles(&manifest, &options.profiles);
        let source = resolve_template_source(
            &manifest.template,
            repo_root,
            options.prefer_remote,
            options.local_path_override.as_deref(),
        );
        let override_root = manifest
            .override_root
            .clone()
            .unwrap_or_else(|| defaults::OVERRIDE_ROOT.to_string());

        debug!("active profiles: {:?}", active_profiles);

        Self {
            repo_root: repo_root.to_path_buf(),
            manifest,
            source,
            override_root,
            active_profiles,
            cache: RemoteCache::new(),
            fetcher,
        }
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &RemoteCache {
        &self.cache
    }

    /// Entries selected by the active profiles, in manifest order.
    pub fn active_entries(&self) -> Vec<&ManagedFileEntry> {
        self.manifest
            .managed_files
            .iter()
            .filter(|entry| is_entry_active(entry, &self.active_profiles))
            .collect()
    }

    /// Expected content for one repo-relative path.
    pub fn resolve(&mut self, relative_path: &str) -> Result<ResolvedContent> {
        resolve_expected_content(
            &self.repo_root,
            &self.source,
            Some(self.override_root.as_str()),
            relative_path,
            &mut self.cache,
            &self.fetcher,
        )
    }

    /// Compare every active entry against the file on disk.
    pub fn check(&mut self) -> Result<CheckReport> {
        let paths = self.active_paths();
        let mut report = CheckReport::default();

        for path in paths {
            let expected = self.resolve(&path)?;
            let actual = read_target(&self.repo_root.join(&path))?;
            report.checked += 1;

            let reason = match actual {
                None => Some(MismatchReason::MissingTarget),
                Some(bytes) if bytes != expected.content.as_bytes() => {
                    Some(MismatchReason::ContentDiffers)
                }
                Some(_) => None,
            };

            if let Some(reason) = reason {
                debug!("{}: {}", path, reason.as_str());
                report.mismatches.push(Mismatch {
                    path,
                    reason,
                    expected_source: expected.source,
                });
            }
        }

        Ok(report)
    }

    /// Write every active entry whose content differs from the template.
    pub fn sync(&mut self) -> Result<SyncReport> {
        self.sync_with(|_, _| {})
    }

    /// Like [`RunContext::sync`], calling `on_write` after each file written.
    pub fn sync_with<F>(&mut self, mut on_write: F) -> Result<SyncReport>
    where
        F: FnMut(&str, &ContentSource),
    {
        let paths = self.active_paths();
        let mut report = SyncReport::default();

        for path in paths {
            let expected = self.resolve(&path)?;
            let target = self.repo_root.join(&path);
            let actual = read_target(&target)?;

            if actual.as_deref() == Some(expected.content.as_bytes()) {
                report.unchanged += 1;
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, expected.content.as_bytes())?;
            on_write(&path, &expected.source);
            report.updated.push(path);
        }

        Ok(report)
    }

    fn active_paths(&self) -> Vec<String> {
        self.active_entries()
            .into_iter()
            .map(|entry| entry.path.clone())
            .collect()
    }
}

/// Current content of a target file, `None` when it does not exist.
fn read_target(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
