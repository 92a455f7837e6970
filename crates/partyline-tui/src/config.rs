//! Runtime configuration.
//!
//! Built once in `main` from the parsed flags and the discovered username,
//! then passed by reference to both operating modes. There is no process-wide
//! mutable settings state.

/// Immutable per-run configuration shared by both modes.
#[derive(Debug, Clone)]
pub struct Config {
    /// Local username, as sent in the login handshake and scanned for in
    /// `@mention` highlighting.
    pub username: String,

    /// Suppress audible mention alerts.
    pub quiet: bool,
}
