//! # Error Handling
//!
//! This module defines the centralized error type for the managed-file
//! engine. It uses `thiserror` to build a single `Error` enum covering every
//! failure the library can report, each with enough context to print a
//! useful diagnostic.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Variants map onto the failure classes of a
//!   run:
//!   - manifest problems (missing file, invalid JSON, empty or malformed
//!     `managed_files`),
//!   - template source problems (no local template and no remote repository
//!     for a required file),
//!   - network problems (connection failures, non-2xx responses, broken
//!     redirect chains),
//!   - template content that is not UTF-8 text,
//!   - drift detected by `check`,
//!   - wrapped I/O, JSON and URL errors.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Every error is fatal for the run. The binary converts them into `anyhow`
//! errors at the command boundary and exits with a non-zero status.

use thiserror::Error;

/// Main error type for managed-file operations
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest could not be read, parsed or validated.
    ///
    /// Includes the manifest path as given to the loader and an optional hint
    /// about how to fix it.
    #[error("Manifest error in {path}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Manifest {
        path: String,
        message: String,
        /// Optional hint for how to fix the manifest
        hint: Option<String>,
    },

    /// No template source can provide a required file.
    #[error("Template source unavailable for {path}: {message}")]
    SourceUnavailable { path: String, message: String },

    /// A request failed before a usable response arrived, or a redirect
    /// chain could not be followed.
    #[error("Network operation error: {url} - {message}")]
    Network { url: String, message: String },

    /// A redirect response carried no `Location` header.
    #[error("Network operation error: {url} - Redirect without location")]
    RedirectWithoutLocation { url: String },

    /// A redirect chain went past the configured number of hops.
    #[error("Network operation error: {url} - Too many redirects (more than {max})")]
    TooManyRedirects { url: String, max: usize },

    /// Expected content for a managed file is not UTF-8 text.
    #[error("Template content is not valid UTF-8 text: {path}")]
    NotUtf8 { path: String },

    /// The remote answered with a non-success, non-redirect status.
    #[error("HTTP {status} for {url}{}", if body.is_empty() { String::new() } else { format!(": {}", body) })]
    HttpStatus {
        url: String,
        status: u16,
        /// Leading part of the response body, already truncated
        body: String,
    },

    /// `check` found managed files whose content differs from the template.
    #[error("Managed file drift detected in {count} file(s)")]
    DriftDetected { count: usize },

    /// Running `git` to locate the repository root failed.
    #[error("Git command failed: {command} - {stderr}")]
    Git { command: String, stderr: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
