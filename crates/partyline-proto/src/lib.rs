//! Wire protocol for the partyline chat client.
//!
//! The server speaks fixed-size binary records: every message on the wire is
//! exactly [`WireRecord::SIZE`] bytes, with all numeric fields in network
//! byte order and text fields NUL-padded to a fixed width. There is no
//! framing delimiter; the constant record size is the frame boundary, so the
//! transport layer reads and writes whole records.
//!
//! Two representations are provided:
//! - [`WireRecord`]: the raw packed record, castable from network bytes.
//! - [`Message`]: an owned, decoded message with normal `String` fields.

pub mod errors;
mod message;
mod record;
mod validate;

pub use errors::ProtocolError;
pub use message::{Message, MessageKind};
pub use record::WireRecord;
pub use validate::{ValidationError, validate_body};
