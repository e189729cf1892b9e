//! # Manifest Schema and Parsing
//!
//! This module defines the data structures that represent the managed-files
//! manifest (`.agent-managed.json` by default) and the logic for loading and
//! validating it.
//!
//! ## Format
//!
//! ```json
//! {
//!   "profiles": ["base", "node-web"],
//!   "template": { "repo": "acme/template", "ref": "main", "localPath": "../template" },
//!   "overrideRoot": ".agent-overrides",
//!   "managed_files": [
//!     { "path": "README.md" },
//!     { "path": "tsconfig.json", "profiles": ["node-web"] }
//!   ]
//! }
//! ```
//!
//! Only `managed_files` is required, and it must be non-empty. Every entry
//! must carry a non-empty, repo-relative `path`. String values are trimmed,
//! blank strings count as absent and profile lists are de-duplicated while
//! keeping their order. Validation happens up front so that a malformed
//! entry stops the run before any file is touched.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::warn;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::path::{is_repo_relative, normalize_path};

/// Where template content comes from, as declared in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateConfig {
    /// Hosted repository slug (`owner/name`) serving remote content.
    pub repo: Option<String>,
    /// Git ref for remote content. Defaults are applied by the source resolver.
    pub r#ref: Option<String>,
    /// Local template checkout, relative to the repository root or absolute.
    pub local_path: Option<String>,
}

/// A single file kept in sync with the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedFileEntry {
    /// Repo-relative path of the managed file, in forward-slash form.
    pub path: String,
    /// Profiles that activate this entry. Empty means always active.
    pub profiles: Vec<String>,
}

/// The parsed manifest. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Profiles activated when the CLI does not override them.
    pub profiles: Vec<String>,
    pub template: TemplateConfig,
    /// Directory of local overrides, relative to the repository root.
    pub override_root: Option<String>,
    /// Managed files in manifest order. Never empty.
    pub managed_files: Vec<ManagedFileEntry>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    profiles: Option<Value>,
    #[serde(default)]
    template: Option<RawTemplate>,
    #[serde(default, rename = "overrideRoot")]
    override_root: Option<String>,
    #[serde(default)]
    managed_files: Option<Vec<RawEntry>>,
}

#[derive(Debug, Deserialize)]
struct RawTemplate {
    #[serde(default)]
    repo: Option<String>,
    #[serde(default, rename = "ref")]
    r#ref: Option<String>,
    #[serde(default, rename = "localPath")]
    local_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    profiles: Option<Value>,
}

/// Trim a string, treating blank values as absent.
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Trim every name, drop blanks and duplicates, keep first-seen order.
pub(crate) fn normalize_list<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        let text = value.trim();
        if text.is_empty() || !seen.insert(text.to_string()) {
            continue;
        }
        out.push(text.to_string());
    }
    out
}

/// Normalized string items of a JSON array. Non-string items and non-array
/// values are ignored.
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| normalize_list(items.iter().filter_map(Value::as_str)))
        .unwrap_or_default()
}

impl Manifest {
    /// Paths that appear in more than one entry, in first-seen order.
    pub fn duplicate_paths(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for entry in &self.managed_files {
            let path = entry.path.as_str();
            if !seen.insert(path) && reported.insert(path) {
                duplicates.push(path);
            }
        }
        duplicates
    }
}

/// Parse manifest JSON. `origin` names the source in error messages.
pub fn parse(json: &str, origin: &str) -> Result<Manifest> {
    let raw: RawManifest = serde_json::from_str(json).map_err(|e| Error::Manifest {
        path: origin.to_string(),
        message: format!("Unable to parse JSON: {}", e),
        hint: None,
    })?;

    let raw_entries = raw.managed_files.unwrap_or_default();
    if raw_entries.is_empty() {
        return Err(Error::Manifest {
            path: origin.to_string(),
            message: "must define non-empty managed_files".to_string(),
            hint: Some(
                "Add at least one { \"path\": \"...\" } entry to managed_files".to_string(),
            ),
        });
    }

    let mut managed_files = Vec::with_capacity(raw_entries.len());
    for (index, entry) in raw_entries.iter().enumerate() {
        let path = non_empty(entry.path.as_deref()).ok_or_else(|| Error::Manifest {
            path: origin.to_string(),
            message: format!(
                "managed_files[{}]: each entry must include a non-empty path",
                index
            ),
            hint: None,
        })?;

        if !is_repo_relative(&path) {
            return Err(Error::Manifest {
                path: origin.to_string(),
                message: format!("managed_files[{}]: path '{}' is absolute", index, path),
                hint: Some("Managed paths are relative to the repository root".to_string()),
            });
        }

        let profiles = string_list(entry.profiles.as_ref());

        managed_files.push(ManagedFileEntry {
            path: normalize_path(&path),
            profiles,
        });
    }

    let template = raw
        .template
        .map(|t| TemplateConfig {
            repo: non_empty(t.repo.as_deref()),
            r#ref: non_empty(t.r#ref.as_deref()),
            local_path: non_empty(t.local_path.as_deref()),
        })
        .unwrap_or_default();

    let manifest = Manifest {
        profiles: string_list(raw.profiles.as_ref()),
        template,
        override_root: non_empty(raw.override_root.as_deref()),
        managed_files,
    };

    for path in manifest.duplicate_paths() {
        warn!(
            "{}: '{}' is listed more than once in managed_files; later entries overwrite earlier ones",
            origin, path
        );
    }

    Ok(manifest)
}

/// Load and validate a manifest from disk.
pub fn from_file(path: &Path) -> Result<Manifest> {
    let origin = normalize_path(&path.to_string_lossy());
    if !path.exists() {
        return Err(Error::Manifest {
            path: origin,
            message: "Managed manifest not found".to_string(),
            hint: Some("Use --manifest to point at a different file".to_string()),
        });
    }
    let json = fs::read_to_string(path)?;
    parse(&json, &origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ORIGIN: &str = ".agent-managed.json";

    #[test]
    fn test_parse_full_manifest() {
        let json = r#"{
            "profiles": ["base", "node-web"],
            "template": { "repo": "acme/template", "ref": "v1", "localPath": "../template" },
            "overrideRoot": "overrides",
            "managed_files": [
                { "path": "README.md" },
                { "path": "tsconfig.json", "profiles": ["node-web"] }
            ]
        }"#;

        let manifest = parse(json, ORIGIN).unwrap();
        assert_eq!(manifest.profiles, vec!["base", "node-web"]);
        assert_eq!(manifest.template.repo.as_deref(), Some("acme/template"));
        assert_eq!(manifest.template.r#ref.as_deref(), Some("v1"));
        assert_eq!(manifest.template.local_path.as_deref(), Some("../template"));
        assert_eq!(manifest.override_root.as_deref(), Some("overrides"));
        assert_eq!(manifest.managed_files.len(), 2);
        assert_eq!(manifest.managed_files[0].path, "README.md");
        assert!(manifest.managed_files[0].profiles.is_empty());
        assert_eq!(manifest.managed_files[1].profiles, vec!["node-web"]);
    }

    #[test]
    fn test_parse_minimal_manifest_defaults() {
        let manifest = parse(r#"{ "managed_files": [{ "path": "a.txt" }] }"#, ORIGIN).unwrap();
        assert!(manifest.profiles.is_empty());
        assert_eq!(manifest.template, TemplateConfig::default());
        assert!(manifest.override_root.is_none());
    }

    #[test]
    fn test_parse_null_fields_are_absent() {
        let json = r#"{
            "profiles": null,
            "template": { "repo": null, "ref": "  ", "localPath": null },
            "overrideRoot": null,
            "managed_files": [{ "path": "a.txt", "profiles": null }]
        }"#;
        let manifest = parse(json, ORIGIN).unwrap();
        assert!(manifest.profiles.is_empty());
        assert!(manifest.template.repo.is_none());
        assert!(manifest.template.r#ref.is_none());
        assert!(manifest.managed_files[0].profiles.is_empty());
    }

    #[test]
    fn test_parse_trims_and_dedups_profiles() {
        let json = r#"{
            "profiles": [" base ", "base", "", "python"],
            "managed_files": [{ "path": " docs/a.md ", "profiles": ["x", " x", "y"] }]
        }"#;
        let manifest = parse(json, ORIGIN).unwrap();
        assert_eq!(manifest.profiles, vec!["base", "python"]);
        assert_eq!(manifest.managed_files[0].path, "docs/a.md");
        assert_eq!(manifest.managed_files[0].profiles, vec!["x", "y"]);
    }

    #[test]
    fn test_parse_ignores_non_string_profiles() {
        let json = r#"{
            "profiles": ["base", 1, null, { "name": "x" }, "python"],
            "managed_files": [
                { "path": "a.md", "profiles": [true, "node-web"] },
                { "path": "b.md", "profiles": "node-web" }
            ]
        }"#;
        let manifest = parse(json, ORIGIN).unwrap();
        assert_eq!(manifest.profiles, vec!["base", "python"]);
        assert_eq!(manifest.managed_files[0].profiles, vec!["node-web"]);
        assert!(manifest.managed_files[1].profiles.is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse("{ not json", ORIGIN).unwrap_err();
        let display = err.to_string();
        assert!(display.contains("Unable to parse JSON"));
        assert!(display.contains(ORIGIN));
    }

    #[test]
    fn test_parse_missing_managed_files() {
        let err = parse(r#"{ "profiles": ["base"] }"#, ORIGIN).unwrap_err();
        assert!(err.to_string().contains("non-empty managed_files"));
    }

    #[test]
    fn test_parse_empty_managed_files() {
        let err = parse(r#"{ "managed_files": [] }"#, ORIGIN).unwrap_err();
        assert!(err.to_string().contains("non-empty managed_files"));
    }

    #[test]
    fn test_parse_entry_without_path() {
        let json = r#"{ "managed_files": [{ "path": "a" }, { "profiles": ["base"] }] }"#;
        let err = parse(json, ORIGIN).unwrap_err();
        let display = err.to_string();
        assert!(display.contains("managed_files[1]"));
        assert!(display.contains("non-empty path"));
    }

    #[test]
    fn test_parse_entry_with_blank_path() {
        let err = parse(r#"{ "managed_files": [{ "path": "   " }] }"#, ORIGIN).unwrap_err();
        assert!(err.to_string().contains("non-empty path"));
    }

    #[test]
    fn test_parse_rejects_absolute_path() {
        let err = parse(r#"{ "managed_files": [{ "path": "/etc/hosts" }] }"#, ORIGIN).unwrap_err();
        assert!(err.to_string().contains("is absolute"));
    }

    #[test]
    fn test_duplicate_paths_are_kept_and_reported() {
        let json = r#"{ "managed_files": [
            { "path": "a.txt" }, { "path": "b.txt" }, { "path": "a.txt" }, { "path": "a.txt" }
        ] }"#;
        let manifest = parse(json, ORIGIN).unwrap();
        assert_eq!(manifest.managed_files.len(), 4);
        assert_eq!(manifest.duplicate_paths(), vec!["a.txt"]);
    }

    #[test]
    fn test_duplicate_paths_log_warning() {
        testing_logger::setup();
        let json = r#"{ "managed_files": [{ "path": "a.txt" }, { "path": "a.txt" }] }"#;
        parse(json, ORIGIN).unwrap();
        testing_logger::validate(|captured_logs| {
            let warnings: Vec<_> = captured_logs
                .iter()
                .filter(|log| log.level == log::Level::Warn)
                .collect();
            assert_eq!(warnings.len(), 1);
            assert!(warnings[0].body.contains("'a.txt' is listed more than once"));
        });
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = from_file(&temp_dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Managed manifest not found"));
    }

    #[test]
    fn test_from_file_reads_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("managed.json");
        fs::write(&path, r#"{ "managed_files": [{ "path": "README.md" }] }"#).unwrap();
        let manifest = from_file(&path).unwrap();
        assert_eq!(manifest.managed_files[0].path, "README.md");
    }

    #[test]
    fn test_normalize_list_keeps_first_seen_order() {
        assert_eq!(
            normalize_list(["b", "a", "b", " ", "c"]),
            vec!["b".to_string(), "a".to_string(), "c".to_string()]
        );
    }
}
