//! CSV record serializer
//!
//! One comma-terminated line per record, no header row and no envelope.
//! Every field except the numeric id is wrapped in double quotes with
//! embedded quotes doubled; that is the only escaping applied. The line
//! keeps its trailing comma after the last field.

use wsrec_protocol::Event;

use crate::fields::{format_time, render_payload};
use crate::{FormatOptions, Result};

/// Serialize an event as one CSV line (without the newline)
pub(crate) fn serialize(event: &Event, options: &FormatOptions) -> Result<String> {
    let mut out = String::with_capacity(64 + event.payload.len());

    if options.include_id {
        out.push_str(&event.connection_id.to_string());
        out.push(',');
    }
    if options.include_direction {
        push_quoted(
            &mut out,
            event.direction.label(
                &options.direction_label_cs,
                &options.direction_label_sc,
            ),
        );
        out.push(',');
    }
    if options.include_url {
        push_quoted(&mut out, &event.connection_url);
        out.push(',');
    }
    if options.include_time {
        push_quoted(&mut out, &format_time(&event.timestamp, &options.time_format)?);
        out.push(',');
    }
    if options.include_data {
        let rendered = render_payload(&event.payload, options.binary_as_base64)?;
        push_quoted(&mut out, &rendered.text);
        out.push(',');
    }

    Ok(out)
}

/// Append a field wrapped in double quotes, doubling embedded quotes
fn push_quoted(out: &mut String, field: &str) {
    out.push('"');
    for c in field.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
}
