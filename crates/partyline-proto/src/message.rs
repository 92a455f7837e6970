//! Owned message type and kind enum.
//!
//! [`Message`] is the decoded, heap-backed view of a wire record. It is only
//! ever fully constructed (just before a send) or fully decoded (just after
//! a whole-record receive); no partially valid message exists.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    errors::{ProtocolError, Result},
    record::WireRecord,
};

/// Message kinds carried in the record's kind field.
///
/// Gaps between values are reserved by the protocol and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum MessageKind {
    /// Client registration, sent once after connect.
    Login = 0,
    /// Client departure notice.
    Logout = 1,
    /// Outbound user message.
    Send = 2,
    /// Inbound broadcast from another user.
    Receive = 10,
    /// Server-initiated termination notice.
    Disconnect = 12,
    /// Informational server notice.
    System = 13,
}

impl MessageKind {
    /// Kind as its wire value.
    #[must_use]
    pub fn to_u32(self) -> u32 {
        self as u32
    }

    /// Kind from its wire value. `None` if unrecognized.
    #[must_use]
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Login),
            1 => Some(Self::Logout),
            2 => Some(Self::Send),
            10 => Some(Self::Receive),
            12 => Some(Self::Disconnect),
            13 => Some(Self::System),
            _ => None,
        }
    }
}

/// A fully decoded chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// What the message is (login, broadcast, notice, ...).
    pub kind: MessageKind,
    /// Seconds since epoch, stamped by the sender.
    pub timestamp: u32,
    /// Sending user. Empty for kinds that carry none.
    pub username: String,
    /// Message text. Empty for kinds that carry none.
    pub body: String,
}

impl Message {
    /// Build the login record sent immediately after connect.
    #[must_use]
    pub fn login(username: &str) -> Self {
        Self {
            kind: MessageKind::Login,
            timestamp: now(),
            username: username.to_string(),
            body: String::new(),
        }
    }

    /// Build the departure notice sent during orderly shutdown.
    #[must_use]
    pub fn logout(username: &str) -> Self {
        Self {
            kind: MessageKind::Logout,
            timestamp: now(),
            username: username.to_string(),
            body: String::new(),
        }
    }

    /// Build an outbound user message stamped with the current time.
    #[must_use]
    pub fn send(username: &str, body: &str) -> Self {
        Self {
            kind: MessageKind::Send,
            timestamp: now(),
            username: username.to_string(),
            body: body.to_string(),
        }
    }

    /// Encode into one fixed-size wire record.
    ///
    /// Text longer than its field width is truncated at the boundary;
    /// shorter text is NUL-padded. Total over valid messages.
    #[must_use]
    pub fn encode(&self) -> [u8; WireRecord::SIZE] {
        let mut record = WireRecord::new(self.kind.to_u32());
        record.set_timestamp(self.timestamp);
        record.set_username(&self.username);
        record.set_body(&self.body);
        record.to_bytes()
    }

    /// Decode one fixed-size wire record.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::RecordTooShort` if the buffer is under one record.
    /// - `ProtocolError::UnknownKind` if the kind value is unrecognized; the
    ///   stream itself stays aligned because the caller already consumed a
    ///   whole record.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let record = WireRecord::from_bytes(bytes)?;
        let kind = MessageKind::from_u32(record.kind_raw())
            .ok_or(ProtocolError::UnknownKind(record.kind_raw()))?;

        Ok(Self {
            kind,
            timestamp: record.timestamp(),
            username: record.username(),
            body: record.body(),
        })
    }
}

/// Current wall-clock time as epoch seconds, saturating at zero pre-epoch.
fn now() -> u32 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs() as u32)
}
