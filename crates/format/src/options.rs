//! Serialization options snapshot

use serde::Deserialize;

use crate::RecordFormat;

/// Default client-to-server direction label
pub const DEFAULT_DIRECTION_CS: &str = "C-S";

/// Default server-to-client direction label
pub const DEFAULT_DIRECTION_SC: &str = "S-C";

/// Default strftime pattern for the record time field
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S-%3f";

/// Read-only options snapshot for one serialization call
///
/// Reconfiguration replaces the whole snapshot atomically between calls;
/// an in-flight serialization never observes a half-applied change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Output record format
    pub format: RecordFormat,

    /// Emit the connection id field
    pub include_id: bool,

    /// Emit the direction field
    pub include_direction: bool,

    /// Emit the connection URL field
    pub include_url: bool,

    /// Emit the interception time field
    pub include_time: bool,

    /// Emit the message payload field
    pub include_data: bool,

    /// Label substituted for client-to-server messages
    pub direction_label_cs: String,

    /// Label substituted for server-to-client messages
    pub direction_label_sc: String,

    /// strftime pattern for the time field
    pub time_format: String,

    /// Base64-encode binary payloads; text payloads are never encoded
    pub binary_as_base64: bool,

    /// Wrap the XML data element in a CDATA section
    pub use_cdata: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            format: RecordFormat::Xml,
            include_id: true,
            include_direction: true,
            include_url: true,
            include_time: true,
            include_data: true,
            direction_label_cs: DEFAULT_DIRECTION_CS.into(),
            direction_label_sc: DEFAULT_DIRECTION_SC.into(),
            time_format: DEFAULT_TIME_FORMAT.into(),
            binary_as_base64: true,
            use_cdata: true,
        }
    }
}

impl FormatOptions {
    /// Snapshot with a different format, other options unchanged
    #[must_use]
    pub fn with_format(mut self, format: RecordFormat) -> Self {
        self.format = format;
        self
    }
}
