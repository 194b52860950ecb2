//! Output record formats and their file envelopes

use std::fmt;

use serde::Deserialize;

/// Textual record format
///
/// A sink is opened for exactly one format and never reformatted in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// One `<wsmessage>` element per record inside a `<wsmessages>` root
    #[default]
    Xml,
    /// One comma-terminated line per record, no envelope
    Csv,
    /// One object per record inside a JSON array
    Json,
    /// Reserved in the configuration surface; serialization is not
    /// implemented
    Raw,
}

impl RecordFormat {
    /// File header written exactly once when a sink opens
    pub fn header(&self) -> &'static str {
        match self {
            RecordFormat::Xml => "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<wsmessages>\n",
            RecordFormat::Json => "[\n",
            RecordFormat::Csv | RecordFormat::Raw => "",
        }
    }

    /// File footer written exactly once when a sink closes
    pub fn footer(&self) -> &'static str {
        match self {
            RecordFormat::Xml => "</wsmessages>\n",
            RecordFormat::Json => "]\n",
            RecordFormat::Csv | RecordFormat::Raw => "",
        }
    }

    /// Whether records can be serialized in this format
    #[inline]
    pub fn is_supported(&self) -> bool {
        !matches!(self, RecordFormat::Raw)
    }

    /// Lowercase format name, as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordFormat::Xml => "xml",
            RecordFormat::Csv => "csv",
            RecordFormat::Json => "json",
            RecordFormat::Raw => "raw",
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
