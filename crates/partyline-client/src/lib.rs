//! Session and concurrency layer for the partyline chat client.
//!
//! This crate owns everything between the wire protocol and the UI:
//!
//! - [`Session`]: one persistent TCP connection with whole-record send and
//!   receive guarantees, split into independent read/write halves.
//! - [`spawn_receiver`]: the long-lived task that decodes inbound records
//!   and forwards them as [`SessionEvent`]s over a channel.
//! - [`History`]: the bounded, order-preserving message store consumed by
//!   the full-screen renderer.
//! - [`ShutdownCoordinator`]: sequences the orderly logout and guarantees at
//!   most one `Logout` record ever reaches the wire.

pub mod error;
pub mod event;
pub mod history;
pub mod receiver;
pub mod session;
pub mod shutdown;

pub use error::{ConnectError, SessionError};
pub use event::SessionEvent;
pub use history::History;
pub use receiver::spawn_receiver;
pub use session::{Session, SessionReader, SessionWriter};
pub use shutdown::{ShutdownCoordinator, ShutdownReason};
