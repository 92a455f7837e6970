//! Error types for the session layer.
//!
//! Connection establishment and mid-session failures are kept as separate
//! types: the former is always fatal before any concurrent activity starts,
//! the latter drives orderly shutdown of a running session.

use std::{io, net::SocketAddr};

use partyline_proto::{MessageKind, ProtocolError};
use thiserror::Error;

/// Failure to establish the session. Fatal; there is no retry policy.
#[derive(Error, Debug)]
pub enum ConnectError {
    /// The transport connect itself failed (refused, unreachable, timeout).
    #[error("cannot connect to {addr}: {source}")]
    Connect {
        /// Address we tried to reach.
        addr: SocketAddr,
        /// Underlying socket error.
        source: io::Error,
    },

    /// Connected, but the login record could not be written.
    #[error("login handshake failed: {0}")]
    Handshake(#[source] io::Error),
}

/// Mid-session failures and expected terminations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Peer ended the stream before a full record arrived.
    ///
    /// An expected termination signal, not a failure: the connection is gone
    /// and shutdown proceeds, but the exit is clean.
    #[error("connection closed by peer")]
    Closed,

    /// Read or write failed mid-session. Not retried.
    #[error("session I/O failed: {0}")]
    Io(#[from] io::Error),

    /// A record decoded to something malformed.
    ///
    /// Unknown kind values are peer violations the receiver logs and skips;
    /// the stream stays aligned because whole records are always consumed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The server sent a kind that is never valid inbound (Login, Logout,
    /// Send). Treated as a broken peer; the session stops.
    #[error("unexpected {0:?} record from server")]
    UnexpectedKind(MessageKind),
}
