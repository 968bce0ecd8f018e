//! # Wire Shapes
//!
//! The blockchain structure as the simulator serializes it: numeric metadata
//! plus byte sequences written out as JSON arrays of small integers.
//!
//! ```text
//! RawBlockchain  = { length, blocks: [RawBlock] }
//! RawBlock       = { index, timestamp, hash: byte[], difficulty, nonce, transactions }
//! RawTransaction = { id, inputs: [RawInput], outputs: [RawOutput] }
//! RawInput       = { id: byte[], out, signature: byte[], public_key: byte[] }
//! RawOutput      = { value, public_key_hash: byte[] }
//! ```

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

/// A byte sequence written as an array of integers.
///
/// Each element is masked to its low 8 bits on the way in, so `-1` and
/// `511` both land as `0xff`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ByteSeq(pub Vec<u8>);

impl ByteSeq {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ByteSeq {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl<'de> Deserialize<'de> for ByteSeq {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MaskedBytes;

        impl<'de> Visitor<'de> for MaskedBytes {
            type Value = ByteSeq;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an array of integers")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ByteSeq, A::Error> {
                let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(32));
                while let Some(value) = seq.next_element::<i64>()? {
                    bytes.push((value & 0xff) as u8);
                }
                Ok(ByteSeq(bytes))
            }
        }

        deserializer.deserialize_seq(MaskedBytes)
    }
}

/// A transaction id, kept as the sender wrote it.
///
/// Strings pass through untouched. Anything else (the simulator sometimes
/// sends the id as a byte array) is kept as its compact JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawTransactionId(pub String);

impl<'de> Deserialize<'de> for RawTransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Self(s)),
            serde_json::Value::Null => Err(de::Error::custom("transaction id is null")),
            other => Ok(Self(other.to_string())),
        }
    }
}

/// A node's full chain as broadcast in `rawBlockchainData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlockchain {
    pub length: u64,
    pub blocks: Vec<RawBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    pub index: u64,
    pub timestamp: u128,
    pub hash: ByteSeq,
    pub difficulty: u128,
    pub nonce: u64,
    pub transactions: Vec<RawTransaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub id: RawTransactionId,
    pub inputs: Vec<RawInput>,
    pub outputs: Vec<RawOutput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    pub id: ByteSeq,
    pub out: i64,
    pub signature: ByteSeq,
    pub public_key: ByteSeq,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOutput {
    pub value: f64,
    pub public_key_hash: ByteSeq,
}
