//! Error types for vouch core.

use thiserror::Error;

/// Errors that can occur while constructing or validating a packet.
///
/// Construction is all-or-nothing: any of these means no packet exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("invalid cardinality: {0}")]
    InvalidCardinality(String),

    #[error("invalid rating: {rating} not within [{min}, {max}] or empty range")]
    InvalidRatingRange { rating: i64, min: i64, max: i64 },

    #[error("invalid signature")]
    InvalidSignature,
}

impl PacketError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        PacketError::MalformedDocument(msg.into())
    }
}

impl From<serde_json::Error> for PacketError {
    fn from(e: serde_json::Error) -> Self {
        PacketError::MalformedDocument(e.to_string())
    }
}

/// Result type for packet operations.
pub type Result<T> = std::result::Result<T, PacketError>;
