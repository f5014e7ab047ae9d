//! Error types for topicwire.

use std::fmt;

use thiserror::Error;

use crate::message::{Message, ParserAction, Topic};

/// Frame section names used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Meta,
    Payload,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Meta => f.write_str("meta"),
            Section::Payload => f.write_str("payload"),
        }
    }
}

/// A protocol-level failure.
///
/// The decoder returns these instead of panicking; the connection layer
/// is expected to send [`ProtocolError::to_message`] back to the peer.
/// Size violations on encode are reported to the local caller only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// First header byte's topic portion is not in the registry.
    #[error("unknown topic byte 0x{0:02x}")]
    UnknownTopic(u8),

    /// Action byte not in the resolved topic's namespace.
    #[error("unknown action byte 0x{code:02x} in topic {topic:?}")]
    UnknownAction { topic: Topic, code: u8 },

    /// Frame parses but violates its action's field contract.
    #[error("message violates its action's field contract: {0}")]
    InvalidMessage(String),

    /// Meta or payload section is not valid JSON.
    #[error("{section} section is not valid JSON")]
    MessageParseError { section: Section },

    /// Declared or actual section length exceeds the maximum.
    #[error("{section} section of {length} bytes exceeds the maximum of {max}")]
    MaximumMessageSizeExceeded {
        section: Section,
        length: usize,
        max: usize,
    },
}

impl ProtocolError {
    /// The outbound PARSER-topic message reporting this failure to the
    /// remote peer.
    pub fn to_message(&self) -> Message {
        let (action, reason) = match self {
            ProtocolError::UnknownTopic(_) => (ParserAction::UnknownTopic, Some("topic")),
            ProtocolError::UnknownAction { .. } => (ParserAction::UnknownAction, Some("action")),
            ProtocolError::InvalidMessage(_) => (ParserAction::InvalidMessage, Some("too long")),
            ProtocolError::MessageParseError { .. } => (ParserAction::MessageParseError, None),
            ProtocolError::MaximumMessageSizeExceeded { .. } => {
                (ParserAction::MaximumMessageSizeExceeded, None)
            }
        };
        Message {
            reason: reason.map(str::to_owned),
            ..Message::new(action)
        }
    }
}

/// Result type alias using [`ProtocolError`].
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Action;

    #[test]
    fn test_unknown_topic_to_message() {
        let msg = ProtocolError::UnknownTopic(0x7f).to_message();
        assert_eq!(msg.topic, Topic::Parser);
        assert_eq!(msg.action, Action::Parser(ParserAction::UnknownTopic));
        assert_eq!(msg.reason.as_deref(), Some("topic"));
        assert!(msg.is_error);
    }

    #[test]
    fn test_unknown_action_to_message() {
        let err = ProtocolError::UnknownAction {
            topic: Topic::Record,
            code: 0xff,
        };
        let msg = err.to_message();
        assert_eq!(msg.action, Action::Parser(ParserAction::UnknownAction));
        assert_eq!(msg.reason.as_deref(), Some("action"));
    }

    #[test]
    fn test_parse_error_carries_no_reason() {
        let err = ProtocolError::MessageParseError {
            section: Section::Meta,
        };
        let msg = err.to_message();
        assert_eq!(msg.action, Action::Parser(ParserAction::MessageParseError));
        assert_eq!(msg.reason, None);
    }

    #[test]
    fn test_error_display() {
        let err = ProtocolError::MaximumMessageSizeExceeded {
            section: Section::Payload,
            length: 20_000_000,
            max: 16_777_215,
        };
        let text = err.to_string();
        assert!(text.contains("payload"));
        assert!(text.contains("exceeds the maximum"));
    }
}
