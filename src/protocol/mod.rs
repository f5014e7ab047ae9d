//! Frame layout, encoder, decoder and the streaming message buffer.
//!
//! This module implements the binary wire contract:
//! - 8-byte header encoding/decoding
//! - message → frame encoding
//! - frame → message decoding with typed protocol errors
//! - a buffer extracting complete messages from partial reads

mod decoder;
mod encoder;
mod meta;
mod stream;
mod wire;

pub use decoder::{decode, decode_with_max, DecodeOutcome};
pub use encoder::{encode, encode_with_max};
pub use stream::MessageBuffer;
pub use wire::{FrameHeader, FIN, HEADER_SIZE, MAX_SECTION_SIZE, TOPIC_MASK};
