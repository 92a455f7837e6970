//! Raw fixed-size wire record with zero-copy parsing.
//!
//! The record is a fixed 1064-byte structure serialized as raw binary with
//! numeric fields in Big Endian. Fields are stored as raw byte arrays to
//! avoid alignment issues; typed access goes through the accessor methods.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::errors::{ProtocolError, Result};

/// Fixed 1064-byte chat record (Big Endian network byte order).
///
/// Layout on the wire:
///
/// | field     | bytes | encoding                    |
/// |-----------|-------|-----------------------------|
/// | kind      | 4     | u32, network byte order     |
/// | timestamp | 4     | u32 epoch seconds, BE       |
/// | username  | 32    | NUL-padded text             |
/// | body      | 1024  | NUL-padded text             |
///
/// The `#[repr(C, packed)]` layout with zerocopy traits means every 1064-byte
/// pattern is a structurally valid record, so casting untrusted network bytes
/// cannot cause undefined behavior. Kind validation is a separate, later step
/// (see [`crate::Message::decode`]): a record with an unrecognized kind still
/// parses, which lets the receiver skip it and keep the stream aligned.
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct WireRecord {
    kind: [u8; 4],      // u32 message kind
    timestamp: [u8; 4], // u32 seconds since epoch
    username: [u8; Self::USERNAME_WIDTH],
    body: [u8; Self::BODY_WIDTH],
}

impl WireRecord {
    /// Size of the serialized record (1064 bytes).
    pub const SIZE: usize = 1064;

    /// Fixed width of the username field.
    pub const USERNAME_WIDTH: usize = 32;

    /// Fixed width of the body field.
    pub const BODY_WIDTH: usize = 1024;

    /// Create a zeroed record with the given raw kind value.
    #[must_use]
    pub fn new(kind: u32) -> Self {
        Self {
            kind: kind.to_be_bytes(),
            timestamp: [0; 4],
            username: [0; Self::USERNAME_WIDTH],
            body: [0; Self::BODY_WIDTH],
        }
    }

    /// Parse a record from network bytes (zero-copy, safe).
    ///
    /// Callers must supply at least one full record; trailing bytes are
    /// ignored. This performs no kind validation.
    ///
    /// # Errors
    ///
    /// `ProtocolError::RecordTooShort` if the buffer holds less than
    /// [`Self::SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<&Self> {
        let record = Self::ref_from_prefix(bytes)
            .map_err(|_| ProtocolError::RecordTooShort {
                expected: Self::SIZE,
                actual: bytes.len(),
            })?
            .0;
        Ok(record)
    }

    /// Serialize the record to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let bytes = IntoBytes::as_bytes(self);
        let mut arr = [0u8; Self::SIZE];
        arr.copy_from_slice(bytes);
        arr
    }

    /// Raw kind value, host byte order.
    #[must_use]
    pub fn kind_raw(&self) -> u32 {
        u32::from_be_bytes(self.kind)
    }

    /// Seconds since epoch, host byte order.
    #[must_use]
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes(self.timestamp)
    }

    /// Username decoded up to the first NUL (lossy on invalid UTF-8).
    #[must_use]
    pub fn username(&self) -> String {
        read_text(&self.username)
    }

    /// Body decoded up to the first NUL (lossy on invalid UTF-8).
    #[must_use]
    pub fn body(&self) -> String {
        read_text(&self.body)
    }

    /// Update the raw kind value.
    pub fn set_kind(&mut self, kind: u32) {
        self.kind = kind.to_be_bytes();
    }

    /// Update the timestamp.
    pub fn set_timestamp(&mut self, timestamp: u32) {
        self.timestamp = timestamp.to_be_bytes();
    }

    /// Write the username field: truncated to the fixed width, NUL-padded.
    pub fn set_username(&mut self, username: &str) {
        write_text(&mut self.username, username);
    }

    /// Write the body field: truncated to the fixed width, NUL-padded.
    pub fn set_body(&mut self, body: &str) {
        write_text(&mut self.body, body);
    }
}

/// Zero the destination, then copy at most `dst.len()` bytes of `src`.
fn write_text(dst: &mut [u8], src: &str) {
    dst.fill(0);
    let n = src.len().min(dst.len());
    dst[..n].copy_from_slice(&src.as_bytes()[..n]);
}

/// Decode a NUL-padded text field up to the first NUL byte.
fn read_text(src: &[u8]) -> String {
    let end = src.iter().position(|&b| b == 0).unwrap_or(src.len());
    String::from_utf8_lossy(&src[..end]).into_owned()
}

// Manual Debug implementation (can't derive due to packed repr)
impl std::fmt::Debug for WireRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WireRecord")
            .field("kind", &self.kind_raw())
            .field("timestamp", &self.timestamp())
            .field("username", &self.username())
            .field("body", &self.body())
            .finish()
    }
}

// Manual PartialEq implementation (can't derive due to packed repr)
impl PartialEq for WireRecord {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for WireRecord {}
