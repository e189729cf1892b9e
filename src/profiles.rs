//! Profile selection for managed files.
//!
//! A run activates a set of profiles. The CLI override wins when it names at
//! least one profile, then the manifest's `profiles`, then the built-in
//! defaults. An entry is active when it declares no profiles or when any of
//! its profiles is in the active set.

use std::collections::BTreeSet;

use crate::defaults;
use crate::manifest::{normalize_list, ManagedFileEntry, Manifest};

/// The profiles active for one run.
pub type ActiveProfiles = BTreeSet<String>;

/// Determine the active profile set.
pub fn resolve_active_profiles(manifest: &Manifest, cli_override: &[String]) -> ActiveProfiles {
    let override_profiles = normalize_list(cli_override.iter().map(String::as_str));

    let selected = if !override_profiles.is_empty() {
        override_profiles
    } else if !manifest.profiles.is_empty() {
        manifest.profiles.clone()
    } else {
        defaults::profiles()
    };

    selected.into_iter().collect()
}

/// Whether an entry participates in a run with the given profiles.
pub fn is_entry_active(entry: &ManagedFileEntry, active: &ActiveProfiles) -> bool {
    entry.profiles.is_empty() || entry.profiles.iter().any(|p| active.contains(p))
}

/// Split a `--profiles` value on commas, trimming parts and dropping empties.
pub fn parse_profile_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
