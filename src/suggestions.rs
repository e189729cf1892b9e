//! # Error Suggestions
//!
//! Helpers that turn library errors into CLI errors carrying a hint about
//! how to fix the problem. Errors should tell users what went wrong AND what
//! to do next.

use crate::defaults;
use crate::error::Error;

/// The error returned by `check` when managed files have drifted.
pub fn drift_detected(count: usize) -> anyhow::Error {
    anyhow::anyhow!(
        "{}\n\n\
         hint: Run: agent-managed-files sync",
        Error::DriftDetected { count }
    )
}

/// Attach a hint to library errors where a next step is obvious.
pub fn with_hint(error: Error) -> anyhow::Error {
    let hint = match &error {
        Error::SourceUnavailable { .. } => Some(format!(
            "hint: Set template.localPath in the manifest or {}\n\
             hint: Set template.repo to fetch missing files remotely",
            defaults::LOCAL_PATH_ENV
        )),
        Error::HttpStatus { status: 404, .. } => Some(
            "hint: Check that template.repo, template.ref and the managed path exist".to_string(),
        ),
        Error::TooManyRedirects { .. } => {
            Some("hint: Use --max-redirects to follow longer redirect chains".to_string())
        }
        Error::Network { .. } => Some(format!(
            "hint: Use --timeout or {} to allow slower connections",
            defaults::TIMEOUT_ENV
        )),
        _ => None,
    };

    match hint {
        Some(hint) => anyhow::anyhow!("{}\n\n{}", error, hint),
        None => anyhow::Error::new(error),
    }
}
