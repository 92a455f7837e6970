//! Receiver task: the inbound half of the client's concurrency model.
//!
//! A long-lived task with a single job: repeatedly receive whole records and
//! forward them as [`SessionEvent`]s. It never writes to the network, places
//! no timeout on the blocking receive, and stops only when the stream ends,
//! the peer disconnects, I/O fails, or the event consumer goes away.

use tokio::{io::AsyncRead, sync::mpsc, task::JoinHandle};

use partyline_proto::MessageKind;

use crate::{error::SessionError, event::SessionEvent, session::SessionReader};

/// Spawn the receiver task.
///
/// Terminal conditions close `events` by dropping the sender, which the
/// input/render loop observes as the signal to begin shutdown.
pub fn spawn_receiver<R>(
    mut reader: SessionReader<R>,
    events: mpsc::Sender<SessionEvent>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            let event = match reader.recv().await {
                Ok(message) => match message.kind {
                    MessageKind::Receive => SessionEvent::Broadcast(message),
                    MessageKind::System => SessionEvent::Notice(message),
                    MessageKind::Disconnect => SessionEvent::Disconnected(message),
                    kind @ (MessageKind::Login | MessageKind::Logout | MessageKind::Send) => {
                        // Never valid inbound; the peer is broken.
                        tracing::error!(?kind, "client-only record kind arrived from server");
                        SessionEvent::Failed(SessionError::UnexpectedKind(kind))
                    },
                },
                Err(SessionError::Protocol(violation)) => {
                    // Whole record already consumed; the stream stays
                    // aligned, so skip and keep reading.
                    tracing::warn!(%violation, "ignoring malformed record");
                    continue;
                },
                Err(SessionError::Closed) => SessionEvent::Closed,
                Err(error) => SessionEvent::Failed(error),
            };

            let terminal = matches!(
                event,
                SessionEvent::Disconnected(_) | SessionEvent::Closed | SessionEvent::Failed(_)
            );

            if events.send(event).await.is_err() {
                // Consumer is gone; nothing left to deliver to.
                return;
            }
            if terminal {
                return;
            }
        }
    })
}
