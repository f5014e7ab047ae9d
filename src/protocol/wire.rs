//! Wire layout of the 8-byte frame header.
//!
//! ```text
//! ┌─────────────┬────────┬─────────────┬─────────────┐
//! │ FIN | topic │ action │ meta length │ payload len │
//! │ 1 byte      │ 1 byte │ 3 bytes     │ 3 bytes     │
//! │ bit7 | 0-6  │        │ u24 BE      │ u24 BE      │
//! └─────────────┴────────┴─────────────┴─────────────┘
//! ```
//!
//! The FIN bit is always set; a cleared bit is reserved for multi-frame
//! continuation and is ignored on decode.

/// Header size in bytes (fixed, exactly 8).
pub const HEADER_SIZE: usize = 8;

/// FIN flag on the first header byte.
pub const FIN: u8 = 0x80;

/// Mask extracting the topic code from the first header byte.
pub const TOPIC_MASK: u8 = 0x7f;

/// Maximum byte length of each section (largest u24 value).
pub const MAX_SECTION_SIZE: usize = (1 << 24) - 1;

/// Decoded frame header. Codes are raw bytes; registry resolution
/// happens in the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Topic code (low 7 bits of byte 0).
    pub topic_code: u8,
    /// Action code within the topic's namespace.
    pub action_code: u8,
    /// Byte length of the meta section.
    pub meta_length: usize,
    /// Byte length of the payload section.
    pub payload_length: usize,
}

impl FrameHeader {
    /// Create a header for the given codes and section lengths.
    pub fn new(topic_code: u8, action_code: u8, meta_length: usize, payload_length: usize) -> Self {
        Self {
            topic_code,
            action_code,
            meta_length,
            payload_length,
        }
    }

    /// Encode to the 8-byte wire form with the FIN bit set.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        debug_assert!(self.meta_length <= MAX_SECTION_SIZE);
        debug_assert!(self.payload_length <= MAX_SECTION_SIZE);
        let mut buf = [0u8; HEADER_SIZE];
        buf[0] = FIN | self.topic_code;
        buf[1] = self.action_code;
        put_u24_be(&mut buf[2..5], self.meta_length);
        put_u24_be(&mut buf[5..8], self.payload_length);
        buf
    }

    /// Decode from bytes. Returns `None` if the buffer holds fewer than
    /// [`HEADER_SIZE`] bytes.
    pub fn decode(buf: &[u8]) -> Option<FrameHeader> {
        if buf.len() < HEADER_SIZE {
            return None;
        }
        Some(FrameHeader {
            topic_code: buf[0] & TOPIC_MASK,
            action_code: buf[1],
            meta_length: read_u24_be(&buf[2..5]),
            payload_length: read_u24_be(&buf[5..8]),
        })
    }

    /// Total frame length declared by this header.
    #[inline]
    pub fn frame_length(&self) -> usize {
        HEADER_SIZE + self.meta_length + self.payload_length
    }
}

fn put_u24_be(buf: &mut [u8], value: usize) {
    buf[0] = (value >> 16) as u8;
    buf[1] = (value >> 8) as u8;
    buf[2] = value as u8;
}

fn read_u24_be(buf: &[u8]) -> usize {
    ((buf[0] as usize) << 16) | ((buf[1] as usize) << 8) | buf[2] as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_encode_decode_roundtrip() {
        let original = FrameHeader::new(0x03, 0x14, 25, 23);
        let encoded = original.encode();
        let decoded = FrameHeader::decode(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_header_byte_layout() {
        let header = FrameHeader::new(0x03, 0x14, 0x010203, 0x040506);
        let bytes = header.encode();

        // FIN bit set on the topic byte.
        assert_eq!(bytes[0], 0x80 | 0x03);
        assert_eq!(bytes[1], 0x14);

        // Meta length, big endian.
        assert_eq!(&bytes[2..5], &[0x01, 0x02, 0x03]);

        // Payload length, big endian.
        assert_eq!(&bytes[5..8], &[0x04, 0x05, 0x06]);
    }

    #[test]
    fn test_header_size_is_exactly_8() {
        assert_eq!(HEADER_SIZE, 8);
        let header = FrameHeader::new(0x01, 0x01, 0, 0);
        assert_eq!(header.encode().len(), 8);
    }

    #[test]
    fn test_decode_ignores_fin_bit() {
        let mut bytes = FrameHeader::new(0x05, 0x01, 0, 0).encode();
        bytes[0] &= TOPIC_MASK; // clear FIN
        let decoded = FrameHeader::decode(&bytes).unwrap();
        assert_eq!(decoded.topic_code, 0x05);
    }

    #[test]
    fn test_decode_too_short_buffer() {
        let buf = [0u8; 7]; // one byte short
        assert!(FrameHeader::decode(&buf).is_none());
    }

    #[test]
    fn test_max_section_size_is_u24_max() {
        assert_eq!(MAX_SECTION_SIZE, 16_777_215);
        let header = FrameHeader::new(0x00, 0x00, MAX_SECTION_SIZE, MAX_SECTION_SIZE);
        let decoded = FrameHeader::decode(&header.encode()).unwrap();
        assert_eq!(decoded.meta_length, MAX_SECTION_SIZE);
        assert_eq!(decoded.payload_length, MAX_SECTION_SIZE);
    }

    #[test]
    fn test_frame_length() {
        let header = FrameHeader::new(0x01, 0x01, 10, 20);
        assert_eq!(header.frame_length(), 38);
    }
}
