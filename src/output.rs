//! # Terminal Output
//!
//! Controls how run results are presented: whether status markers are
//! emoji or plain bracketed tags, and whether paths and sources are
//! colored.
//!
//! The `--color=always|never|auto` flag decides first. In `auto` mode the
//! environment is consulted:
//! - `NO_COLOR` (any value) disables color (https://no-color.org/)
//! - `CLICOLOR=0` disables color
//! - `CLICOLOR_FORCE` set to a non-zero value forces color
//! - `TERM=dumb` disables color
//! - otherwise color follows the `console` crate's TTY detection

use std::env;

use console::Style;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

/// Status markers printed in front of result lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Ok,
    Synced,
    Drift,
}

impl Marker {
    fn emoji(self) -> &'static str {
        match self {
            Marker::Ok => "✅",
            Marker::Synced => "📝",
            Marker::Drift => "⚠️",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Marker::Ok => "[OK]",
            Marker::Synced => "[SYNC]",
            Marker::Drift => "[DRIFT]",
        }
    }
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// The marker as emoji or plain tag.
    pub fn marker(&self, marker: Marker) -> &'static str {
        if self.use_color {
            marker.emoji()
        } else {
            marker.plain()
        }
    }

    /// A managed file path, bold when colors are on.
    pub fn path(&self, path: &str) -> String {
        self.paint(Style::new().bold(), path)
    }

    /// A content source label, dimmed when colors are on.
    pub fn source(&self, label: &str) -> String {
        self.paint(Style::new().dim(), label)
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.use_color {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}
