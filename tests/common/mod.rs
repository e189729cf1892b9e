//! Shared test utilities for CLI end-to-end tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_manifest(manifests::README_LOCAL)
//!         .with_template_file("README.md", "# Hello\n");
//!     fixture.command("sync").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
}

/// Manifest snippets used across tests. Local template paths are relative to
/// the fixture's repository directory.
#[allow(dead_code)]
pub mod manifests {
    /// A single always-active README sourced from the local template.
    pub const README_LOCAL: &str = r#"{
  "template": { "localPath": "../template" },
  "managed_files": [{ "path": "README.md", "profiles": [] }]
}"#;

    /// Entries gated on different profiles.
    pub const PROFILED: &str = r#"{
  "template": { "localPath": "../template" },
  "managed_files": [
    { "path": "README.md" },
    { "path": "package.json", "profiles": ["node-web"] },
    { "path": "pyproject.toml", "profiles": ["python"] }
  ]
}"#;

    /// Nested managed paths.
    pub const NESTED: &str = r#"{
  "template": { "localPath": "../template" },
  "managed_files": [
    { "path": ".github/workflows/ci.yml" },
    { "path": "docs/CONTRIBUTING.md" }
  ]
}"#;

    /// No local template and no remote repository.
    pub const NO_SOURCE: &str = r#"{
  "managed_files": [{ "path": "README.md" }]
}"#;

    /// Valid JSON without managed files.
    pub const EMPTY_MANAGED_FILES: &str = r#"{ "profiles": ["base"], "managed_files": [] }"#;

    /// An entry with no path.
    pub const MISSING_PATH: &str = r#"{
  "template": { "localPath": "../template" },
  "managed_files": [{ "path": "README.md" }, { "profiles": ["base"] }]
}"#;

    /// Not JSON at all.
    pub const INVALID_JSON: &str = "{ managed_files: [";
}

/// A temporary workspace holding a `repo/` directory (the repository being
/// managed) next to a `template/` directory (the local template checkout).
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a fixture with empty `repo/` and `template/` directories.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("repo")
            .create_dir_all()
            .expect("Failed to create repo directory");
        temp_dir
            .child("template")
            .create_dir_all()
            .expect("Failed to create template directory");
        Self { temp_dir }
    }

    /// Write `.agent-managed.json` into the repository.
    pub fn with_manifest(self, content: &str) -> Self {
        self.with_repo_file(".agent-managed.json", content)
    }

    /// Add a file to the local template.
    pub fn with_template_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child("template")
            .child(path)
            .write_str(content)
            .expect("Failed to write template file");
        self
    }

    /// Add a file to the repository.
    pub fn with_repo_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child("repo")
            .child(path)
            .write_str(content)
            .expect("Failed to write repo file");
        self
    }

    /// Add an override under the default override root.
    #[allow(dead_code)]
    pub fn with_override(self, path: &str, content: &str) -> Self {
        let path = format!(".agent-overrides/{}", path);
        self.with_repo_file(&path, content)
    }

    /// The managed repository directory.
    pub fn repo(&self) -> PathBuf {
        self.temp_dir.path().join("repo")
    }

    /// The workspace root containing `repo/` and `template/`.
    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A file inside the repository.
    pub fn repo_child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child("repo").child(path)
    }

    /// Read a repository file, `None` if it does not exist.
    #[allow(dead_code)]
    pub fn read(&self, path: &str) -> Option<String> {
        std::fs::read_to_string(self.repo().join(path)).ok()
    }

    /// Create a command running `mode` against this fixture's repository.
    ///
    /// The environment overrides are cleared and colors disabled so output
    /// is stable regardless of the caller's environment.
    pub fn command(&self, mode: &str) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("agent-managed-files");
        cmd.current_dir(self.repo())
            .env_remove("AGENT_TEMPLATE_LOCAL_PATH")
            .env_remove("AGENT_MANAGED_TIMEOUT")
            .env_remove("RUST_LOG")
            .arg(mode)
            .arg("--repo-root")
            .arg(self.repo())
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_layout() {
        let fixture = TestFixture::new();
        assert!(fixture.repo().is_dir());
        assert!(fixture.root().join("template").is_dir());
    }

    #[test]
    fn test_fixture_with_manifest() {
        let fixture = TestFixture::new().with_manifest(manifests::README_LOCAL);
        assert!(fixture.repo().join(".agent-managed.json").exists());
    }

    #[test]
    fn test_manifests_are_valid_json() {
        for manifest in [
            manifests::README_LOCAL,
            manifests::PROFILED,
            manifests::NESTED,
            manifests::NO_SOURCE,
            manifests::EMPTY_MANAGED_FILES,
            manifests::MISSING_PATH,
        ] {
            serde_json::from_str::<serde_json::Value>(manifest).expect("Manifest should be valid JSON");
        }
    }

    #[test]
    fn test_invalid_json_is_actually_invalid() {
        assert!(serde_json::from_str::<serde_json::Value>(manifests::INVALID_JSON).is_err());
    }
}
