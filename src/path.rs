//! Path manipulation utilities for managed files

use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::defaults;
use crate::error::{Error, Result};

/// Convert a platform path string to forward-slash form.
///
/// Manifest paths, cache keys and source labels are always expressed with
/// `/` separators regardless of the host platform.
pub fn normalize_path(input: &str) -> String {
    input
        .split(std::path::MAIN_SEPARATOR)
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether a manifest path can be resolved relative to the repository root.
pub fn is_repo_relative(path: &str) -> bool {
    !path.starts_with('/') && !Path::new(path).has_root()
}

/// Express `target` relative to `base`, inserting `..` segments when
/// `target` lies outside `base`.
///
/// Both paths are expected to be absolute. The result is used for
/// diagnostics only and is always in forward-slash form.
pub fn relative_to(base: &Path, target: &Path) -> String {
    let base: Vec<Component> = base.components().collect();
    let target: Vec<Component> = target.components().collect();

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }

    normalize_path(&relative.to_string_lossy())
}

/// Build the raw-content URL for a file in a hosted repository.
///
/// The ref and each path segment are percent-encoded individually, so a ref
/// such as `release/1.0` stays a single segment while the file path keeps
/// its directory structure.
pub fn raw_content_url(repo_slug: &str, r#ref: &str, relative_path: &str) -> Result<Url> {
    let mut url = Url::parse(defaults::RAW_CONTENT_BASE)?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| Error::UrlParse(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
        segments.clear();
        for part in repo_slug.split('/').filter(|p| !p.is_empty()) {
            segments.push(part);
        }
        segments.push(r#ref);
        for part in relative_path.split('/') {
            segments.push(part);
        }
    }
    Ok(url)
}
