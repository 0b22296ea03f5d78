//! Error types for the vouch facade.

use thiserror::Error;
use vouch_core::PacketError;

/// Errors that can occur during facade operations.
#[derive(Debug, Error)]
pub enum VouchError {
    /// Packet construction or validation error.
    #[error("packet error: {0}")]
    Packet(#[from] PacketError),

    /// Key material could not be decoded.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, VouchError>;
