//! Frame encoder.
//!
//! Pure function from a [`Message`] to its wire frame. The only failure
//! modes are a section exceeding the u24 size ceiling and a message
//! whose flags or fields contradict its action's contract; no bytes are
//! produced on failure.

use serde::Serialize;

use crate::error::{ProtocolError, Result, Section};
use crate::message::{Action, Message};
use crate::schema::{schema_of, PayloadKind};

use super::meta::MetaSection;
use super::wire::{FrameHeader, MAX_SECTION_SIZE};

/// Encode a message into a single complete frame.
///
/// # Example
///
/// ```
/// use topicwire::{encode, ConnectionAction, Message};
///
/// let frame = encode(&Message::new(ConnectionAction::Ping)).unwrap();
/// assert_eq!(frame, vec![0x80 | 0x01, 0x01, 0, 0, 0, 0, 0, 0]);
/// ```
pub fn encode(message: &Message) -> Result<Vec<u8>> {
    encode_with_max(message, MAX_SECTION_SIZE)
}

/// Encode with a custom section size ceiling (never above the
/// structural u24 maximum).
pub fn encode_with_max(message: &Message, max_section_size: usize) -> Result<Vec<u8>> {
    let max = max_section_size.min(MAX_SECTION_SIZE);
    let wire_action = wire_action_of(message)?;
    let schema = schema_of(wire_action);

    let meta = MetaSection::from_message(message, &schema);
    let meta_text = if meta.is_empty() {
        String::new()
    } else {
        to_json(&meta)?
    };

    let payload_text = match (&message.parsed_data, schema.payload) {
        (Some(value), PayloadKind::Data) => to_json(value)?,
        (Some(_), PayloadKind::None) => {
            return Err(ProtocolError::InvalidMessage(format!(
                "action {:?} does not carry a payload",
                wire_action
            )))
        }
        (None, _) => String::new(),
    };

    if meta_text.len() > max {
        return Err(ProtocolError::MaximumMessageSizeExceeded {
            section: Section::Meta,
            length: meta_text.len(),
            max,
        });
    }
    if payload_text.len() > max {
        return Err(ProtocolError::MaximumMessageSizeExceeded {
            section: Section::Payload,
            length: payload_text.len(),
            max,
        });
    }

    let header = FrameHeader::new(
        message.topic.code(),
        wire_action.code(),
        meta_text.len(),
        payload_text.len(),
    );

    let mut frame = Vec::with_capacity(header.frame_length());
    frame.extend_from_slice(&header.encode());
    frame.extend_from_slice(meta_text.as_bytes());
    frame.extend_from_slice(payload_text.as_bytes());
    Ok(frame)
}

/// Resolve the wire action byte source: the base action, or its ack /
/// write-ack variant when the corresponding flag is set.
fn wire_action_of(message: &Message) -> Result<Action> {
    if message.action.topic() != message.topic {
        return Err(ProtocolError::InvalidMessage(format!(
            "action {:?} does not belong to topic {:?}",
            message.action, message.topic
        )));
    }
    if message.is_write_ack {
        return message.action.write_ack_variant().ok_or_else(|| {
            ProtocolError::InvalidMessage(format!(
                "action {:?} has no write-ack variant",
                message.action
            ))
        });
    }
    if message.is_ack {
        return message.action.ack_variant().ok_or_else(|| {
            ProtocolError::InvalidMessage(format!("action {:?} has no ack variant", message.action))
        });
    }
    Ok(message.action)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|err| ProtocolError::InvalidMessage(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{ConnectionAction, PresenceAction, RecordAction, RpcAction, Topic};
    use crate::protocol::wire::HEADER_SIZE;
    use serde_json::json;

    #[test]
    fn test_encode_ping_is_header_only() {
        let frame = encode(&Message::new(ConnectionAction::Ping)).unwrap();
        assert_eq!(
            frame,
            vec![0x80 | Topic::Connection.code(), 0x01, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_encode_record_update() {
        let message = Message {
            name: Some("user/someId".into()),
            version: Some(1),
            parsed_data: Some(json!({ "firstname": "Wolfram" })),
            ..Message::new(RecordAction::Update)
        };
        let frame = encode(&message).unwrap();

        let meta = r#"{"n":"user/someId","v":1}"#;
        let payload = r#"{"firstname":"Wolfram"}"#;
        assert_eq!(frame[1], RecordAction::Update.code());
        assert_eq!(&frame[2..5], &[0, 0, meta.len() as u8]);
        assert_eq!(&frame[5..8], &[0, 0, payload.len() as u8]);
        assert_eq!(&frame[HEADER_SIZE..HEADER_SIZE + meta.len()], meta.as_bytes());
        assert_eq!(&frame[HEADER_SIZE + meta.len()..], payload.as_bytes());
    }

    #[test]
    fn test_write_ack_flag_switches_action_byte() {
        let base = Message {
            name: Some("user/someId".into()),
            version: Some(1),
            parsed_data: Some(json!({ "firstname": "Wolfram" })),
            ..Message::new(RecordAction::Update)
        };
        let with_ack = Message {
            is_write_ack: true,
            ..base.clone()
        };

        let base_frame = encode(&base).unwrap();
        let ack_frame = encode(&with_ack).unwrap();

        assert_eq!(base_frame[1], RecordAction::Update.code());
        assert_eq!(ack_frame[1], RecordAction::UpdateWithWriteAck.code());
        // Meta and payload are byte-identical.
        assert_eq!(&base_frame[2..], &ack_frame[2..]);
    }

    #[test]
    fn test_ack_flag_switches_action_byte() {
        let message = Message {
            name: Some("addValues".into()),
            ..Message::ack(RpcAction::Provide)
        };
        let frame = encode(&message).unwrap();
        assert_eq!(frame[1], RpcAction::ProvideAck.code());
    }

    #[test]
    fn test_write_ack_on_non_mutation_is_rejected() {
        let message = Message {
            is_write_ack: true,
            name: Some("user/someId".into()),
            ..Message::new(RecordAction::Head)
        };
        assert!(matches!(
            encode(&message),
            Err(ProtocolError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_undeclared_payload_is_rejected() {
        let message = Message {
            parsed_data: Some(json!({ "x": 1 })),
            ..Message::new(ConnectionAction::Ping)
        };
        assert!(matches!(
            encode(&message),
            Err(ProtocolError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_topic_action_mismatch_is_rejected() {
        let message = Message {
            topic: Topic::Event,
            ..Message::new(ConnectionAction::Ping)
        };
        assert!(matches!(
            encode(&message),
            Err(ProtocolError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_presence_subscribe_uses_correlation_id() {
        let message = Message {
            correlation_id: Some("1234".into()),
            parsed_data: Some(json!(["alan", "john"])),
            ..Message::new(PresenceAction::Subscribe)
        };
        let frame = encode(&message).unwrap();
        let meta_len = frame[4] as usize;
        let meta = &frame[HEADER_SIZE..HEADER_SIZE + meta_len];
        assert_eq!(meta, br#"{"c":"1234"}"#);
    }

    #[test]
    fn test_meta_at_size_limit_succeeds_one_more_fails() {
        // {"n":"aaaa..."} — 8 bytes of JSON framing around the name.
        let fits = "a".repeat(100 - 8);
        let message = Message {
            name: Some(fits),
            ..Message::new(RecordAction::Head)
        };
        assert!(encode_with_max(&message, 100).is_ok());

        let message = Message {
            name: Some("a".repeat(100 - 8 + 1)),
            ..Message::new(RecordAction::Head)
        };
        assert!(matches!(
            encode_with_max(&message, 100),
            Err(ProtocolError::MaximumMessageSizeExceeded {
                section: Section::Meta,
                ..
            })
        ));
    }

    #[test]
    fn test_scalar_payload_is_json_quoted() {
        let message = Message {
            name: Some("someEvent".into()),
            parsed_data: Some(json!("data")),
            ..Message::new(crate::message::EventAction::Emit)
        };
        let frame = encode(&message).unwrap();
        assert!(frame.ends_with(br#""data""#));
    }
}
