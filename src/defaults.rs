//! Default values for managed-file runs.
//!
//! This module provides centralized default values used across the library
//! and the CLI, ensuring consistency and avoiding duplication.

use std::time::Duration;

/// Manifest location, relative to the repository root.
pub const MANIFEST_PATH: &str = ".agent-managed.json";

/// Directory holding locally committed overrides, relative to the repository
/// root. Used when the manifest does not declare `overrideRoot`.
pub const OVERRIDE_ROOT: &str = ".agent-overrides";

/// Template ref used when the manifest does not declare one.
pub const TEMPLATE_REF: &str = "main";

/// Profiles activated when neither the CLI nor the manifest selects any.
pub const PROFILES: [&str; 2] = ["base", "node-web"];

/// Environment variable overriding the manifest's `template.localPath`.
pub const LOCAL_PATH_ENV: &str = "AGENT_TEMPLATE_LOCAL_PATH";

/// Environment variable for the network timeout in seconds.
pub const TIMEOUT_ENV: &str = "AGENT_MANAGED_TIMEOUT";

/// Timeout applied to each remote request, in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Maximum number of redirects followed for a single remote file.
pub const MAX_REDIRECTS: usize = 5;

/// Host serving raw repository content.
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

/// Returns the default request timeout.
pub fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Returns the default active profile list as owned strings.
pub fn profiles() -> Vec<String> {
    PROFILES.iter().map(|p| p.to_string()).collect()
}
