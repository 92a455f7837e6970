//! Local username discovery.
//!
//! The username comes from the execution environment and doubles as the
//! login identity and the mention pattern, so it is validated up front: a
//! name that cannot survive the fixed-width wire field or the printable
//! rule is rejected before any network activity.

use std::env;

use partyline_proto::WireRecord;
use thiserror::Error;

/// Reasons username discovery fails. All fatal before connecting.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsernameError {
    /// Neither `$USER` nor `$LOGNAME` is set.
    #[error("no username in environment ($USER or $LOGNAME)")]
    Missing,

    /// The environment value was empty after trimming.
    #[error("username is empty")]
    Empty,

    /// Must leave room for the NUL terminator in the 32-byte wire field.
    #[error("username too long: {0} bytes (max {max})", max = WireRecord::USERNAME_WIDTH - 1)]
    TooLong(usize),

    /// Usernames are printable ASCII only.
    #[error("username contains non-printable character {0:?}")]
    NonPrintable(char),
}

/// Discover the local username from the environment.
pub fn discover() -> Result<String, UsernameError> {
    let raw = env::var("USER")
        .or_else(|_| env::var("LOGNAME"))
        .map_err(|_| UsernameError::Missing)?;
    sanitize(&raw)
}

/// Trim and validate a candidate username.
fn sanitize(raw: &str) -> Result<String, UsernameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(UsernameError::Empty);
    }
    if name.len() >= WireRecord::USERNAME_WIDTH {
        return Err(UsernameError::TooLong(name.len()));
    }
    if let Some(bad) = name.chars().find(|&c| !c.is_ascii() || c.is_ascii_control()) {
        return Err(UsernameError::NonPrintable(bad));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass() {
        assert_eq!(sanitize("alice"), Ok("alice".to_string()));
        assert_eq!(sanitize("bob-2\n"), Ok("bob-2".to_string()));
    }

    #[test]
    fn empty_and_whitespace_rejected() {
        assert_eq!(sanitize(""), Err(UsernameError::Empty));
        assert_eq!(sanitize("   "), Err(UsernameError::Empty));
    }

    #[test]
    fn width_boundary() {
        assert!(sanitize(&"a".repeat(31)).is_ok());
        assert_eq!(sanitize(&"a".repeat(32)), Err(UsernameError::TooLong(32)));
    }

    #[test]
    fn non_printable_rejected() {
        assert_eq!(sanitize("al\u{1}ce"), Err(UsernameError::NonPrintable('\u{1}')));
        assert_eq!(sanitize("ren\u{e9}e"), Err(UsernameError::NonPrintable('\u{e9}')));
    }
}
