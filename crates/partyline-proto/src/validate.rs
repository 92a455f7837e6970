//! Outbound body validation.
//!
//! Applied locally before a message is ever sent: rejected bodies are
//! reported to the user and never reach the wire.

use thiserror::Error;

use crate::record::WireRecord;

/// Reasons an outbound message body is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty bodies carry nothing worth sending.
    #[error("message is empty")]
    Empty,

    /// Body must leave room for the NUL terminator in the fixed-width field.
    #[error("message too long: {0} bytes (max {max})", max = WireRecord::BODY_WIDTH - 1)]
    TooLong(usize),

    /// A byte outside the printable-ASCII-plus-tab range.
    #[error("illegal byte {byte:#04x} at position {index}")]
    IllegalByte {
        /// Offending byte value.
        byte: u8,
        /// Byte offset within the body.
        index: usize,
    },
}

/// Check an outbound message body against the wire rules.
///
/// Accepted iff `1 <= len <= 1023` and every byte is tab (9) or printable
/// ASCII (`32..=126`). Control bytes, DEL, and anything above 126 reject the
/// whole body.
pub fn validate_body(body: &str) -> Result<(), ValidationError> {
    if body.is_empty() {
        return Err(ValidationError::Empty);
    }
    if body.len() >= WireRecord::BODY_WIDTH {
        return Err(ValidationError::TooLong(body.len()));
    }

    for (index, byte) in body.bytes().enumerate() {
        let printable = byte == 9 || (32..=126).contains(&byte);
        if !printable {
            return Err(ValidationError::IllegalByte { byte, index });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_body_rejected() {
        assert_eq!(validate_body(""), Err(ValidationError::Empty));
    }

    #[test]
    fn max_length_boundary() {
        assert!(validate_body(&"a".repeat(1023)).is_ok());
        assert_eq!(validate_body(&"a".repeat(1024)), Err(ValidationError::TooLong(1024)));
    }

    #[test]
    fn tab_is_the_only_accepted_control_byte() {
        assert!(validate_body("col1\tcol2").is_ok());
        assert_eq!(
            validate_body("line1\nline2"),
            Err(ValidationError::IllegalByte { byte: 10, index: 5 })
        );
    }

    #[test]
    fn control_and_high_bytes_rejected() {
        // Byte 5 (ENQ) and byte 200 from the protocol's canonical examples.
        assert!(matches!(
            validate_body("ab\u{5}cd"),
            Err(ValidationError::IllegalByte { byte: 5, .. })
        ));
        // U+00C8 encodes as 0xC3 0x88 in UTF-8; both are >= 127.
        assert!(matches!(
            validate_body("caf\u{c8}"),
            Err(ValidationError::IllegalByte { byte: 0xC3, .. })
        ));
    }

    proptest! {
        #[test]
        fn printable_ascii_always_accepted(body in "[ -~]{1,1023}") {
            prop_assert!(validate_body(&body).is_ok());
        }

        #[test]
        fn bodies_with_a_control_byte_always_rejected(
            prefix in "[ -~]{0,20}",
            byte in prop_oneof![0u8..=8, 10u8..=31],
            suffix in "[ -~]{0,20}",
        ) {
            let mut body = prefix;
            body.push(char::from(byte));
            body.push_str(&suffix);
            prop_assert!(validate_body(&body).is_err());
        }
    }
}
