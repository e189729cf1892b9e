//! # Expected Content Resolution
//!
//! Determines what a managed file *should* contain. Three tiers are
//! consulted, highest precedence first:
//!
//! 1. **Override**: a file committed under the override root
//!    (`.agent-overrides/<path>` by default) always wins.
//! 2. **Local template**: the file under the local template root, unless
//!    remote content was explicitly preferred.
//! 3. **Remote template**: the raw file from the template repository at the
//!    configured ref, fetched once per run and then served from the
//!    `RemoteCache`.
//!
//! Each result carries a `ContentSource` naming the tier that produced it.
//! The source is only used in diagnostics.

use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;

use crate::cache::{CacheKey, RemoteCache};
use crate::error::{Error, Result};
use crate::http::RemoteFetcher;
use crate::path::{normalize_path, raw_content_url, relative_to};
use crate::source::TemplateSource;

/// The tier that supplied a file's expected content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Override file, path relative to the repository root.
    Override(String),
    /// Local template file, path relative to the repository root.
    TemplateLocal(String),
    /// Remote template file.
    TemplateRemote {
        repo_slug: String,
        r#ref: String,
        path: String,
    },
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Override(path) => write!(f, "override:{}", path),
            ContentSource::TemplateLocal(path) => write!(f, "template-local:{}", path),
            ContentSource::TemplateRemote {
                repo_slug,
                r#ref,
                path,
            } => write!(f, "template-remote:{}@{}/{}", repo_slug, r#ref, path),
        }
    }
}

/// Expected content for one managed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    pub content: String,
    pub source: ContentSource,
}

impl ResolvedContent {
    /// Human-readable provenance, e.g. `template-local:../template/README.md`.
    pub fn source_label(&self) -> String {
        self.source.to_string()
    }
}

/// Fetch a file from the template, local first unless remote is preferred.
///
/// `relative_path` must be repo-relative. When the file is neither available
/// locally nor obtainable from a configured remote repository, the error says
/// which of the two situations applies.
pub fn get_template_file_content(
    repo_root: &Path,
    source: &TemplateSource,
    relative_path: &str,
    cache: &mut RemoteCache,
    fetcher: &RemoteFetcher,
) -> Result<ResolvedContent> {
    let normalized = normalize_path(relative_path);

    if let Some(local_root) = source.local_root.as_deref().filter(|_| source.uses_local()) {
        let local_file = local_root.join(&normalized);
        if local_file.is_file() {
            debug!("{}: using local template {}", normalized, local_file.display());
            return Ok(ResolvedContent {
                content: read_text(&local_file)?,
                source: ContentSource::TemplateLocal(relative_to(repo_root, &local_file)),
            });
        }
    }

    let Some(repo_slug) = source.repo_slug.as_deref() else {
        let message = if source.local_available && source.local_root.is_some() {
            "Template file missing locally"
        } else {
            "No template repo configured and local template path unavailable"
        };
        return Err(Error::SourceUnavailable {
            path: normalized,
            message: message.to_string(),
        });
    };

    let key = CacheKey::new(repo_slug, &source.r#ref, &normalized);
    let content = cache.get_or_fetch(key, || {
        let url = raw_content_url(repo_slug, &source.r#ref, &normalized)?;
        fetcher.fetch_text(&url)
    })?;

    Ok(ResolvedContent {
        content,
        source: ContentSource::TemplateRemote {
            repo_slug: repo_slug.to_string(),
            r#ref: source.r#ref.clone(),
            path: normalized,
        },
    })
}

/// Resolve the expected content of a managed file.
///
/// An existing file under `<repo_root>/<override_root>/<path>` wins over any
/// template content; otherwise this delegates to
/// [`get_template_file_content`].
pub fn resolve_expected_content(
    repo_root: &Path,
    source: &TemplateSource,
    override_root: Option<&str>,
    relative_path: &str,
    cache: &mut RemoteCache,
    fetcher: &RemoteFetcher,
) -> Result<ResolvedContent> {
    let normalized = normalize_path(relative_path);

    if let Some(override_root) = override_root {
        let override_file = repo_root.join(override_root).join(&normalized);
        if override_file.is_file() {
            debug!("{}: using override {}", normalized, override_file.display());
            return Ok(ResolvedContent {
                content: read_text(&override_file)?,
                source: ContentSource::Override(relative_to(repo_root, &override_file)),
            });
        }
    }

    get_template_file_content(repo_root, source, &normalized, cache, fetcher)
}

/// Read a local override or template file as UTF-8 text.
fn read_text(file: &Path) -> Result<String> {
    String::from_utf8(fs::read(file)?).map_err(|_| Error::NotUtf8 {
        path: normalize_path(&file.to_string_lossy()),
    })
}
