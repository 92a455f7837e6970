//! Process termination signals as one awaitable future.
//!
//! The signal path never touches the socket itself: a delivered signal
//! completes this future inside the mode's select loop, and the orderly
//! shutdown path performs the single best-effort logout afterwards.

use tokio::signal::unix::{SignalKind, signal};

/// Completes when SIGINT or SIGTERM is delivered.
pub async fn terminated() -> std::io::Result<()> {
    let mut term = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = term.recv() => Ok(()),
    }
}
