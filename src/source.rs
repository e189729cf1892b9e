//! Template source resolution.
//!
//! Decides once per run where template content can come from. Nothing is
//! fetched here; the result only records the local root (and whether it
//! exists right now), the remote repository and ref, and whether remote
//! content was explicitly preferred.

use std::path::{Path, PathBuf};

use log::debug;

use crate::defaults;
use crate::manifest::{non_empty, TemplateConfig};

/// Resolved template source for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// Absolute local template directory, if one is configured.
    pub local_root: Option<PathBuf>,
    /// True when `local_root` existed on disk at resolution time.
    pub local_available: bool,
    /// Skip the local template even when it is available.
    pub prefer_remote: bool,
    /// Hosted repository slug (`owner/name`).
    pub repo_slug: Option<String>,
    pub r#ref: String,
}

impl TemplateSource {
    /// Whether local template files are consulted before the remote.
    pub fn uses_local(&self) -> bool {
        !self.prefer_remote && self.local_available && self.local_root.is_some()
    }
}

/// Resolve the template source from the manifest's `template` block.
///
/// `local_path_override` (normally the `AGENT_TEMPLATE_LOCAL_PATH`
/// environment variable) takes precedence over `template.localPath`.
/// Relative local paths are resolved against `repo_root`.
pub fn resolve_template_source(
    template: &TemplateConfig,
    repo_root: &Path,
    prefer_remote: bool,
    local_path_override: Option<&str>,
) -> TemplateSource {
    let local_path =
        non_empty(local_path_override).or_else(|| template.local_path.clone());
    let local_root = local_path.map(|p| repo_root.join(p));
    let local_available = local_root.as_deref().is_some_and(Path::exists);

    let source = TemplateSource {
        local_root,
        local_available,
        prefer_remote,
        repo_slug: template.repo.clone(),
        r#ref: template
            .r#ref
            .clone()
            .unwrap_or_else(|| defaults::TEMPLATE_REF.to_string()),
    };

    debug!(
        "template source: local={:?} (available: {}), remote={:?}@{}, prefer_remote={}",
        source.local_root, source.local_available, source.repo_slug, source.r#ref, prefer_remote
    );

    source
}
