//! Byte sequence <-> hex string codec.
//!
//! Every byte becomes exactly two lowercase hex digits, concatenated in
//! sequence order. The empty sequence encodes to the empty string.

use shared_types::ByteSeq;

/// Encode bytes as lowercase hex.
pub fn encode_bytes(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Encode a wire byte sequence (already masked to 8 bits).
pub fn encode_seq(seq: &ByteSeq) -> String {
    encode_bytes(seq.as_slice())
}

/// Inverse of [`encode_bytes`]. Accepts either case.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s)
}
