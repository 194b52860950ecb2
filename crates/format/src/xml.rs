//! XML record serializer
//!
//! One `<wsmessage>` element per record; the enclosing `<wsmessages>` root
//! is the sink envelope, not part of the record. Field text is embedded
//! verbatim; the optional CDATA section around the data element is the only
//! protection against payloads containing markup.

use wsrec_protocol::Event;

use crate::fields::{format_time, render_payload};
use crate::{FormatOptions, Result};

/// Serialize an event as one `<wsmessage>` element
pub(crate) fn serialize(event: &Event, options: &FormatOptions) -> Result<String> {
    let mut out = String::with_capacity(128 + event.payload.len());
    out.push_str("<wsmessage>");

    if options.include_id {
        out.push_str("<id>");
        out.push_str(&event.connection_id.to_string());
        out.push_str("</id>");
    }
    if options.include_direction {
        out.push_str("<direction>");
        out.push_str(event.direction.label(
            &options.direction_label_cs,
            &options.direction_label_sc,
        ));
        out.push_str("</direction>");
    }
    if options.include_url {
        out.push_str("<url>");
        out.push_str(&event.connection_url);
        out.push_str("</url>");
    }
    if options.include_time {
        out.push_str("<time>");
        out.push_str(&format_time(&event.timestamp, &options.time_format)?);
        out.push_str("</time>");
    }
    if options.include_data {
        let rendered = render_payload(&event.payload, options.binary_as_base64)?;
        if rendered.base64 {
            out.push_str("<data fmt=\"base64\">");
        } else {
            out.push_str("<data>");
        }
        if options.use_cdata {
            out.push_str("<![CDATA[");
        }
        out.push_str(&rendered.text);
        if options.use_cdata {
            out.push_str("]]>");
        }
        out.push_str("</data>");
    }

    out.push_str("</wsmessage>");
    Ok(out)
}
