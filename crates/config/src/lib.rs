//! wsrec - Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! An empty config is valid: the recorder starts with XML output to a
//! timestamped file and all record fields enabled.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use wsrec_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[record]\nformat = \"json\"").unwrap();
//! ```
//!
//! # Example Full Config
//!
//! ```toml
//! [record]
//! output = "captures/session.xml"
//! format = "xml"                  # xml | csv | json
//! include_id = true
//! include_direction = true
//! include_url = true
//! include_time = true
//! include_data = true
//! direction_label_cs = "C-S"
//! direction_label_sc = "S-C"
//! time_format = "%Y-%m-%d_%H-%M-%S-%3f"
//! binary_as_base64 = true
//! use_cdata = true
//! enabled = true
//!
//! [log]
//! level = "info"
//! format = "console"
//! output = "stdout"
//! ```

mod error;
mod logging;
mod record;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel, LogOutput};
pub use record::RecordConfig;

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Recording options and output destination
    pub record: RecordConfig,

    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        contents.parse()
    }

    /// Validate cross-field constraints
    ///
    /// Called automatically by `from_file` and `from_str`.
    pub fn validate(&self) -> Result<()> {
        self.record.validate()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
