//! Error types for the partyline wire protocol.

use thiserror::Error;

/// Convenience result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while decoding wire records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Buffer is shorter than one full record.
    #[error("record too short: expected {expected} bytes, got {actual}")]
    RecordTooShort {
        /// Required record size in bytes.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },

    /// The kind field does not map to a known message kind.
    ///
    /// The protocol reserves gaps between kind values; an unknown value is a
    /// peer violation, not a transport failure, and callers are expected to
    /// log it and keep reading.
    #[error("unknown message kind {0}")]
    UnknownKind(u32),
}
