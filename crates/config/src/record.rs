//! Recording configuration
//!
//! Mirrors the operator-facing settings panel: the output destination, one
//! toggle per record field, direction labels, the time format, and the
//! binary/CDATA switches. The serialization fields flatten straight into
//! `FormatOptions` so the snapshot handed to the serializer is exactly
//! what was configured.

use std::fmt::Write as FmtWrite;
use std::path::PathBuf;

use serde::Deserialize;

use wsrec_format::FormatOptions;

use crate::{ConfigError, Result};

/// `[record]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecordConfig {
    /// Output file path
    ///
    /// When omitted the recorder falls back to its timestamped default
    /// file name in the current directory.
    pub output: Option<PathBuf>,

    /// Serialization options (format, field toggles, labels, time format,
    /// base64/CDATA switches)
    #[serde(flatten)]
    pub options: FormatOptions,

    /// Whether messages are recorded from the start
    pub enabled: bool,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            output: None,
            options: FormatOptions::default(),
            enabled: true,
        }
    }
}

impl RecordConfig {
    /// Options snapshot for the serializer
    pub fn format_options(&self) -> FormatOptions {
        self.options.clone()
    }

    /// Validate the section
    ///
    /// Rejects an empty output path, the unimplemented `raw` format, and
    /// a time format the formatter cannot render.
    pub fn validate(&self) -> Result<()> {
        if let Some(output) = &self.output {
            if output.as_os_str().is_empty() {
                return Err(ConfigError::invalid_value(
                    "record",
                    "output",
                    "must not be empty",
                ));
            }
        }

        if !self.options.format.is_supported() {
            return Err(ConfigError::invalid_value(
                "record",
                "format",
                format!("'{}' has no serializer", self.options.format),
            ));
        }

        if self.options.time_format.is_empty() {
            return Err(ConfigError::invalid_value(
                "record",
                "time_format",
                "must not be empty",
            ));
        }
        if !time_format_renders(&self.options.time_format) {
            return Err(ConfigError::invalid_value(
                "record",
                "time_format",
                format!("pattern '{}' is not renderable", self.options.time_format),
            ));
        }

        Ok(())
    }
}

/// Check a strftime pattern by rendering the current time with it
fn time_format_renders(pattern: &str) -> bool {
    let mut out = String::new();
    write!(out, "{}", chrono::Local::now().format(pattern)).is_ok()
}
