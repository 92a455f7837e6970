//! Events forwarded from the receiver task to the input/render loop.

use partyline_proto::Message;

use crate::error::SessionError;

/// What the receiver task observed on the wire.
///
/// `Disconnected`, `Closed`, and `Failed` are terminal: the receiver stops
/// after sending them and the channel closes, which is what unblocks the
/// input/render loop's shutdown path.
#[derive(Debug)]
pub enum SessionEvent {
    /// Inbound broadcast from another user.
    Broadcast(Message),

    /// Informational server notice.
    Notice(Message),

    /// Server-initiated termination. The peer already knows we are gone, so
    /// no `Logout` is owed.
    Disconnected(Message),

    /// Peer ended the stream without a disconnect notice. Expected
    /// termination, clean exit.
    Closed,

    /// Transport or peer failure; drives a non-zero exit.
    Failed(SessionError),
}
