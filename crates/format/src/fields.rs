//! Field rendering shared by all format serializers

use std::borrow::Cow;
use std::fmt::Write as FmtWrite;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Local};

use wsrec_protocol::Payload;

use crate::{FormatError, Result};

/// Payload resolved to embeddable text
#[derive(Debug)]
pub(crate) struct RenderedPayload<'a> {
    /// The text to embed
    pub text: Cow<'a, str>,

    /// Whether the text is a base64 encoding of binary data
    pub base64: bool,
}

/// Resolve a payload to text
///
/// Text payloads pass through verbatim regardless of the base64 flag.
/// Binary payloads are base64-encoded when the flag is set, otherwise they
/// must decode as UTF-8.
pub(crate) fn render_payload(
    payload: &Payload,
    binary_as_base64: bool,
) -> Result<RenderedPayload<'_>> {
    match payload {
        Payload::Text(text) => Ok(RenderedPayload {
            text: Cow::Borrowed(text),
            base64: false,
        }),
        Payload::Binary(bytes) if binary_as_base64 => Ok(RenderedPayload {
            text: Cow::Owned(STANDARD.encode(bytes)),
            base64: true,
        }),
        Payload::Binary(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|source| FormatError::InvalidUtf8 {
                len: bytes.len(),
                source,
            })?;
            Ok(RenderedPayload {
                text: Cow::Borrowed(text),
                base64: false,
            })
        }
    }
}

/// Render a timestamp with an operator-supplied strftime pattern
///
/// chrono reports bad patterns through the formatter, so the failure is
/// mapped to an error instead of reaching the producer as a panic.
pub(crate) fn format_time(timestamp: &DateTime<Local>, pattern: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", timestamp.format(pattern)).map_err(|_| FormatError::InvalidTimeFormat {
        pattern: pattern.to_string(),
    })?;
    Ok(out)
}
