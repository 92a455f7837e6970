//! Connection session with whole-record I/O.
//!
//! The transport may deliver partial reads and writes; this layer absorbs
//! them so callers only ever see complete records. A message is either a
//! fully read record or it does not exist.

use std::net::SocketAddr;

use partyline_proto::{Message, WireRecord};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
};

use crate::error::{ConnectError, SessionError};

/// One persistent connection to the chat server.
///
/// Created once at startup via [`Session::connect`], which also performs the
/// login handshake; split into halves so the receiver task and the send path
/// progress independently. The socket is released on drop.
pub struct Session {
    stream: TcpStream,
}

impl Session {
    /// Open the TCP connection and perform the login handshake.
    ///
    /// Immediately after a successful connect, one `Login` record carrying
    /// the username and current timestamp is sent. The server treats this as
    /// implicit registration; no acknowledgment is awaited.
    pub async fn connect(addr: SocketAddr, username: &str) -> Result<Self, ConnectError> {
        let mut stream = TcpStream::connect(addr)
            .await
            .map_err(|source| ConnectError::Connect { addr, source })?;

        let login = Message::login(username);
        stream.write_all(&login.encode()).await.map_err(ConnectError::Handshake)?;

        Ok(Self { stream })
    }

    /// Split into independent read and write halves.
    pub fn split(self) -> (SessionReader, SessionWriter) {
        let (read, write) = self.stream.into_split();
        (SessionReader { inner: read }, SessionWriter { inner: write })
    }
}

/// Reading half of a session. Owned by the receiver task.
///
/// Generic over the transport so tests can drive it with an in-memory
/// duplex stream.
pub struct SessionReader<R = OwnedReadHalf> {
    inner: R,
}

impl<R: AsyncRead + Unpin> SessionReader<R> {
    /// Wrap an arbitrary transport (tests).
    pub fn from_transport(inner: R) -> Self {
        Self { inner }
    }

    /// Receive exactly one whole record and decode it.
    ///
    /// Loops internally (via `read_exact`) until the full fixed-size record
    /// has accumulated, however fragmented the transport delivers it. A
    /// stream that ends before the record completes is
    /// [`SessionError::Closed`]; no partial record is ever surfaced.
    pub async fn recv(&mut self) -> Result<Message, SessionError> {
        let mut buf = [0u8; WireRecord::SIZE];
        self.inner.read_exact(&mut buf).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                SessionError::Closed
            } else {
                SessionError::Io(e)
            }
        })?;

        Ok(Message::decode(&buf)?)
    }
}

/// Writing half of a session. Owned by the input loop.
pub struct SessionWriter<W = OwnedWriteHalf> {
    inner: W,
}

impl<W: AsyncWrite + Unpin> SessionWriter<W> {
    /// Wrap an arbitrary transport (tests).
    pub fn from_transport(inner: W) -> Self {
        Self { inner }
    }

    /// Serialize and write the full fixed-size record.
    ///
    /// `write_all` retries partial writes until every byte is on the wire;
    /// zero-progress writes surface as [`SessionError::Io`].
    pub async fn send(&mut self, message: &Message) -> Result<(), SessionError> {
        self.inner.write_all(&message.encode()).await?;
        Ok(())
    }
}
