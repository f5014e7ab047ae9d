//! Message buffer for accumulating partial reads.
//!
//! A stream transport delivers bytes in arbitrary chunks; this buffer
//! collects them and yields every message whose frame has fully
//! arrived, keeping the remainder for the next push. Relative ordering
//! between frames is the transport's concern, not enforced here.

use bytes::BytesMut;

use crate::error::Result;
use crate::message::Message;

use super::decoder::{decode_with_max, DecodeOutcome};
use super::wire::MAX_SECTION_SIZE;

/// Buffer extracting complete messages from a fragmented byte stream.
///
/// # Example
///
/// ```
/// use topicwire::{encode, ConnectionAction, Message, MessageBuffer};
///
/// let frame = encode(&Message::new(ConnectionAction::Ping)).unwrap();
/// let mut buffer = MessageBuffer::new();
///
/// // First half of the frame: nothing to yield yet.
/// assert!(buffer.push(&frame[..4]).unwrap().is_empty());
///
/// // Rest arrives, the message comes out.
/// let messages = buffer.push(&frame[4..]).unwrap();
/// assert_eq!(messages.len(), 1);
/// ```
pub struct MessageBuffer {
    buffer: BytesMut,
    max_section_size: usize,
}

impl MessageBuffer {
    /// Create a buffer with the structural u24 section size ceiling.
    pub fn new() -> Self {
        Self::with_max_section(MAX_SECTION_SIZE)
    }

    /// Create a buffer with a custom section size ceiling.
    pub fn with_max_section(max_section_size: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(8 * 1024),
            max_section_size,
        }
    }

    /// Push data into the buffer and extract all complete messages.
    ///
    /// Returns an empty vector while a frame is still partial. On a
    /// protocol error the buffer should be considered poisoned: the
    /// caller reports the error to the peer and drops the connection
    /// state, since resynchronizing inside a corrupt stream is not
    /// possible.
    pub fn push(&mut self, data: &[u8]) -> Result<Vec<Message>> {
        self.buffer.extend_from_slice(data);

        let mut messages = Vec::new();
        loop {
            match decode_with_max(&self.buffer, self.max_section_size)? {
                DecodeOutcome::Complete { message, consumed } => {
                    let _ = self.buffer.split_to(consumed);
                    messages.push(message);
                }
                DecodeOutcome::Incomplete => break,
            }
        }
        Ok(messages)
    }

    /// Number of buffered bytes not yet forming a complete frame.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop all buffered bytes.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new()
    }
}
