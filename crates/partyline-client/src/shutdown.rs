//! Lifecycle and shutdown coordination.
//!
//! The session moves `Connecting -> Active -> ShuttingDown -> Closed`. Any
//! of several triggers can start the shutdown race (signal, end of input,
//! peer disconnect, transport failure); the coordinator arbitrates it and
//! guarantees that at most one `Logout` record is ever placed on the wire,
//! and none at all when the peer initiated the disconnect.

use partyline_proto::Message;
use tokio::io::AsyncWrite;

use crate::{error::SessionError, session::SessionWriter};

/// Why the session is shutting down.
#[derive(Debug)]
pub enum ShutdownReason {
    /// SIGINT/SIGTERM delivered to the process.
    Signal,

    /// Standard input reached end-of-stream (line mode).
    EndOfInput,

    /// The user quit from the full-screen interface.
    UserQuit,

    /// The server sent a `Disconnect` notice; it already knows we are gone.
    PeerDisconnect,

    /// The peer ended the stream without a disconnect notice.
    StreamClosed,

    /// The local interface failed mid-session; a logout is still owed.
    Interface,

    /// A mid-session transport or peer failure.
    Transport(SessionError),
}

impl ShutdownReason {
    /// True when the peer was already informed and no `Logout` is owed.
    #[must_use]
    pub fn peer_notified(&self) -> bool {
        matches!(self, Self::PeerDisconnect)
    }

    /// True for reasons that should produce a non-zero exit code.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Interface)
    }
}

/// Sequences the orderly logout, exactly once.
///
/// `finish` is only called after the input/render loop has fully stopped,
/// so the logout can never interleave with user sends.
#[derive(Debug, Default)]
pub struct ShutdownCoordinator {
    logout_sent: bool,
}

impl ShutdownCoordinator {
    /// Create a coordinator that has sent nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Perform the shutdown-side protocol obligation for `reason`.
    ///
    /// Sends one best-effort `Logout` record unless the peer already knows
    /// (received `Disconnect`) or a logout went out earlier. A failed write
    /// here is logged and dropped: the process is exiting either way and
    /// the peer will observe the stream close.
    pub async fn finish<W>(
        &mut self,
        writer: &mut SessionWriter<W>,
        username: &str,
        reason: &ShutdownReason,
    ) where
        W: AsyncWrite + Unpin,
    {
        if reason.peer_notified() {
            tracing::debug!("peer initiated disconnect, skipping logout");
            return;
        }
        if self.logout_sent {
            return;
        }
        self.logout_sent = true;

        if let Err(error) = writer.send(&Message::logout(username)).await {
            tracing::warn!(%error, "best-effort logout failed");
        }
    }

    /// Whether a logout has been placed on the wire.
    #[must_use]
    pub fn logout_sent(&self) -> bool {
        self.logout_sent
    }
}

#[cfg(test)]
mod tests {
    use partyline_proto::{MessageKind, WireRecord};
    use tokio::io::AsyncReadExt;

    use super::*;

    async fn drain(server: &mut tokio::io::DuplexStream) -> Vec<Message> {
        let mut bytes = Vec::new();
        server.read_to_end(&mut bytes).await.unwrap();
        bytes
            .chunks(WireRecord::SIZE)
            .map(|chunk| Message::decode(chunk).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn normal_shutdown_sends_exactly_one_logout() {
        let (client, mut server) = tokio::io::duplex(WireRecord::SIZE * 4);
        let mut writer = SessionWriter::from_transport(client);
        let mut coordinator = ShutdownCoordinator::new();

        // Signal-path and orderly-path logouts may race; both go through
        // the coordinator, so only the first wins.
        coordinator.finish(&mut writer, "bob", &ShutdownReason::Signal).await;
        coordinator.finish(&mut writer, "bob", &ShutdownReason::EndOfInput).await;
        drop(writer);

        let sent = drain(&mut server).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, MessageKind::Logout);
        assert_eq!(sent[0].username, "bob");
        assert!(coordinator.logout_sent());
    }

    #[tokio::test]
    async fn interface_failure_still_sends_logout() {
        let (client, mut server) = tokio::io::duplex(WireRecord::SIZE * 4);
        let mut writer = SessionWriter::from_transport(client);
        let mut coordinator = ShutdownCoordinator::new();

        // A broken local interface is not a peer notification; the peer
        // still gets the orderly logout.
        coordinator.finish(&mut writer, "bob", &ShutdownReason::Interface).await;
        drop(writer);

        let sent = drain(&mut server).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, MessageKind::Logout);
        assert!(ShutdownReason::Interface.is_failure());
    }

    #[tokio::test]
    async fn peer_disconnect_sends_no_logout() {
        let (client, mut server) = tokio::io::duplex(WireRecord::SIZE * 4);
        let mut writer = SessionWriter::from_transport(client);
        let mut coordinator = ShutdownCoordinator::new();

        coordinator.finish(&mut writer, "bob", &ShutdownReason::PeerDisconnect).await;
        drop(writer);

        assert!(drain(&mut server).await.is_empty());
        assert!(!coordinator.logout_sent());
    }

    #[tokio::test]
    async fn logout_failure_is_swallowed() {
        let (client, server) = tokio::io::duplex(WireRecord::SIZE);
        drop(server);
        let mut writer = SessionWriter::from_transport(client);
        let mut coordinator = ShutdownCoordinator::new();

        // Write side of a closed duplex errors; finish must not panic or
        // propagate.
        coordinator.finish(&mut writer, "bob", &ShutdownReason::StreamClosed).await;
        assert!(coordinator.logout_sent());
    }
}
