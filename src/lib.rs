//! # topicwire
//!
//! Binary framing codec for a topic/action based publish-subscribe and
//! RPC protocol (connection handshake, authentication, record
//! replication, RPC dispatch, event emission, presence tracking).
//!
//! The crate covers the wire contract only: the frame byte layout, the
//! numeric topic/action registries, the write-acknowledgement variant
//! mechanism and the canonical message catalog used to validate
//! round-trip correctness. Sockets, sessions and the handlers consuming
//! decoded messages live outside.
//!
//! ## Frame layout
//!
//! 8-byte header (`0x80 | topic`, action, meta length and payload
//! length as 24-bit big-endian integers), followed by the meta section
//! (abbreviated-key JSON) and the payload section (JSON), both UTF-8
//! and possibly empty.
//!
//! ## Example
//!
//! ```
//! use topicwire::{decode, encode, DecodeOutcome, Message, RecordAction};
//! use serde_json::json;
//!
//! let update = Message {
//!     name: Some("user/someId".into()),
//!     version: Some(1),
//!     parsed_data: Some(json!({ "firstname": "Wolfram" })),
//!     ..Message::new(RecordAction::Update)
//! };
//!
//! let frame = encode(&update).unwrap();
//! match decode(&frame).unwrap() {
//!     DecodeOutcome::Complete { message, .. } => assert_eq!(message, update),
//!     DecodeOutcome::Incomplete => unreachable!(),
//! }
//! ```
//!
//! The codec is pure: encoding and decoding have no shared state and
//! may run concurrently from any number of threads.

pub mod catalog;
pub mod error;
pub mod message;
pub mod protocol;
pub mod schema;

pub use error::{ProtocolError, Result, Section};
pub use message::{
    Action, AuthAction, ConnectionAction, EventAction, Message, ParserAction, PresenceAction,
    RecordAction, RpcAction, Topic,
};
pub use protocol::{
    decode, decode_with_max, encode, encode_with_max, DecodeOutcome, FrameHeader, MessageBuffer,
    HEADER_SIZE, MAX_SECTION_SIZE,
};
