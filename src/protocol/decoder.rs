//! Frame decoder.
//!
//! Operates on a single complete frame at the front of a byte buffer.
//! A buffer shorter than the declared frame is reported as
//! [`DecodeOutcome::Incomplete`], never as an error; every real failure
//! is a typed [`ProtocolError`] the connection layer can send back to
//! the peer.

use serde_json::Value;

use crate::error::{ProtocolError, Result, Section};
use crate::message::{Action, Message, Topic};
use crate::schema::{schema_of, MessageSchema, MetaKey, PayloadKind};

use super::meta::MetaSection;
use super::wire::{FrameHeader, HEADER_SIZE, MAX_SECTION_SIZE, TOPIC_MASK};

/// Result of attempting to decode a frame from a byte buffer.
///
/// `Incomplete` means "await more input": the distinction from a parse
/// failure matters because partial reads are routine on a stream
/// transport.
#[derive(Debug, PartialEq)]
pub enum DecodeOutcome {
    /// A full frame was decoded.
    Complete {
        message: Message,
        /// Total bytes consumed from the front of the buffer.
        consumed: usize,
    },
    /// The buffer does not hold a complete frame yet.
    Incomplete,
}

/// Decode the frame at the front of `buf`.
pub fn decode(buf: &[u8]) -> Result<DecodeOutcome> {
    decode_with_max(buf, MAX_SECTION_SIZE)
}

/// Decode with a custom section size ceiling.
///
/// The u24 length fields cannot structurally exceed
/// [`MAX_SECTION_SIZE`], but a lower configured ceiling lets a server
/// refuse oversized frames before buffering them.
pub fn decode_with_max(buf: &[u8], max_section_size: usize) -> Result<DecodeOutcome> {
    if buf.is_empty() {
        return Ok(DecodeOutcome::Incomplete);
    }

    // The topic is resolvable from the first byte alone; an unknown
    // topic is reported no matter how short the rest of the frame is.
    let topic_code = buf[0] & TOPIC_MASK;
    let topic =
        Topic::from_code(topic_code).ok_or(ProtocolError::UnknownTopic(topic_code))?;

    let header = match FrameHeader::decode(buf) {
        Some(header) => header,
        None => return Ok(DecodeOutcome::Incomplete),
    };

    let action = Action::from_code(topic, header.action_code).ok_or(
        ProtocolError::UnknownAction {
            topic,
            code: header.action_code,
        },
    )?;

    if header.meta_length > max_section_size {
        return Err(ProtocolError::MaximumMessageSizeExceeded {
            section: Section::Meta,
            length: header.meta_length,
            max: max_section_size,
        });
    }
    if header.payload_length > max_section_size {
        return Err(ProtocolError::MaximumMessageSizeExceeded {
            section: Section::Payload,
            length: header.payload_length,
            max: max_section_size,
        });
    }

    if buf.len() < header.frame_length() {
        return Ok(DecodeOutcome::Incomplete);
    }

    let meta_bytes = &buf[HEADER_SIZE..HEADER_SIZE + header.meta_length];
    let payload_bytes =
        &buf[HEADER_SIZE + header.meta_length..header.frame_length()];

    let schema = schema_of(action);
    let meta = parse_meta(meta_bytes)?;
    validate_meta(&meta, &schema, action)?;
    let parsed_data = parse_payload(payload_bytes, schema.payload, action)?;

    // Normalize variant wire codes back to the base action plus flag.
    let (action, is_ack, is_write_ack) = if let Some(base) = action.write_ack_base() {
        (base, false, true)
    } else if let Some(base) = action.ack_base() {
        (base, true, false)
    } else {
        (action, false, false)
    };

    let message = Message {
        is_ack,
        is_write_ack,
        name: meta.n,
        version: meta.v,
        path: meta.p,
        correlation_id: meta.c,
        reason: meta.r,
        url: meta.u,
        subscription: meta.s,
        parsed_data,
        ..Message::new(action)
    };

    Ok(DecodeOutcome::Complete {
        message,
        consumed: header.frame_length(),
    })
}

fn parse_meta(bytes: &[u8]) -> Result<MetaSection> {
    if bytes.is_empty() {
        return Ok(MetaSection::default());
    }
    // Two stages: JSON syntax errors are parse errors, while a
    // well-formed object with unknown keys or wrong value types is a
    // schema violation.
    let value: Value = serde_json::from_slice(bytes).map_err(|_| {
        ProtocolError::MessageParseError {
            section: Section::Meta,
        }
    })?;
    serde_json::from_value(value).map_err(|err| ProtocolError::InvalidMessage(err.to_string()))
}

fn validate_meta(meta: &MetaSection, schema: &MessageSchema, action: Action) -> Result<()> {
    for &key in MetaKey::ALL {
        let present = meta.has(key);
        if present && !schema.declares(key) {
            return Err(ProtocolError::InvalidMessage(format!(
                "unexpected meta key \"{}\" for action {:?}",
                key.key(),
                action
            )));
        }
        if !present && schema.requires(key) {
            return Err(ProtocolError::InvalidMessage(format!(
                "missing meta key \"{}\" for action {:?}",
                key.key(),
                action
            )));
        }
    }
    Ok(())
}

fn parse_payload(bytes: &[u8], kind: PayloadKind, action: Action) -> Result<Option<Value>> {
    if bytes.is_empty() {
        return Ok(None);
    }
    if kind == PayloadKind::None {
        return Err(ProtocolError::InvalidMessage(format!(
            "action {:?} does not carry a payload",
            action
        )));
    }
    let value = serde_json::from_slice(bytes).map_err(|_| ProtocolError::MessageParseError {
        section: Section::Payload,
    })?;
    Ok(Some(value))
}
