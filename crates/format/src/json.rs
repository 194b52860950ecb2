//! JSON record serializer
//!
//! One object per record, keys in the fixed field order, numeric id
//! unquoted. Every object is followed by a literal comma, including the
//! last one before the array close; consumers strip the known trailing
//! comma before parsing.

use wsrec_protocol::Event;

use crate::fields::{format_time, render_payload};
use crate::{FormatOptions, Result};

/// Serialize an event as one JSON object followed by a comma
pub(crate) fn serialize(event: &Event, options: &FormatOptions) -> Result<String> {
    let mut out = String::with_capacity(64 + event.payload.len());
    let mut prepend_comma = false;
    out.push('{');

    if options.include_id {
        out.push_str("\"id\":");
        out.push_str(&event.connection_id.to_string());
        prepend_comma = true;
    }
    if options.include_direction {
        if prepend_comma {
            out.push(',');
        }
        out.push_str("\"direction\":");
        push_escaped(
            &mut out,
            event.direction.label(
                &options.direction_label_cs,
                &options.direction_label_sc,
            ),
        );
        prepend_comma = true;
    }
    if options.include_url {
        if prepend_comma {
            out.push(',');
        }
        out.push_str("\"url\":");
        push_escaped(&mut out, &event.connection_url);
        prepend_comma = true;
    }
    if options.include_time {
        if prepend_comma {
            out.push(',');
        }
        out.push_str("\"time\":");
        push_escaped(&mut out, &format_time(&event.timestamp, &options.time_format)?);
        prepend_comma = true;
    }
    if options.include_data {
        if prepend_comma {
            out.push(',');
        }
        out.push_str("\"data\":");
        let rendered = render_payload(&event.payload, options.binary_as_base64)?;
        push_escaped(&mut out, &rendered.text);
    }

    out.push('}');
    out.push(',');
    Ok(out)
}

/// Append a quoted string value, escaping the characters JSON requires
fn push_escaped(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '/' => out.push_str("\\/"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
}
