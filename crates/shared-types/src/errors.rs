//! # Error Types
//!
//! Defines error types shared between the decoder and its consumers.

use thiserror::Error;

/// Errors raised while turning one raw text message into an `Envelope`.
///
/// Any of these means the message is discarded and prior state is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not JSON, or JSON that is not an object.
    #[error("Malformed message: {reason}")]
    Malformed { reason: String },

    /// A required top-level field is absent.
    #[error("Missing field: {field}")]
    MissingField { field: &'static str },

    /// A top-level field is present with the wrong shape.
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Result type for envelope decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;
