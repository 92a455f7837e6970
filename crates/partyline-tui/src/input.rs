//! Pending input line for the full-screen mode.
//!
//! Owns the not-yet-submitted text buffer. Keys that cannot fit the wire
//! body field or fall outside the printable rule are ignored at the
//! keystroke level, so a submitted buffer is always a valid message body.

use crossterm::event::KeyCode;

use partyline_proto::WireRecord;

/// Maximum pending-line length: the body field minus its NUL terminator.
pub const MAX_PENDING: usize = WireRecord::BODY_WIDTH - 1;

/// What a keystroke did to the pending line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Buffer changed (or the key was absorbed); re-render.
    Edited,
    /// Enter on a non-empty buffer: this body should be sent.
    Submit(String),
    /// The user asked to leave (Esc).
    Quit,
}

/// Editable, bounded text buffer for the prompt region.
#[derive(Debug, Default)]
pub struct InputState {
    buffer: String,
}

impl InputState {
    /// Create an empty pending line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pending text.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Apply one keystroke.
    ///
    /// Printable keys and tab append (silently dropped past
    /// [`MAX_PENDING`]); Backspace removes the last character; Enter
    /// submits a non-empty buffer and clears it. Every keystroke outcome
    /// triggers a re-render.
    pub fn handle_key(&mut self, code: KeyCode) -> KeyOutcome {
        match code {
            KeyCode::Char(c) if is_printable(c) => self.push(c),
            // The terminal reports tab as its own key, not as `Char('\t')`.
            KeyCode::Tab => self.push('\t'),
            KeyCode::Backspace => {
                self.buffer.pop();
                KeyOutcome::Edited
            },
            KeyCode::Enter => {
                if self.buffer.is_empty() {
                    KeyOutcome::Edited
                } else {
                    KeyOutcome::Submit(std::mem::take(&mut self.buffer))
                }
            },
            KeyCode::Esc => KeyOutcome::Quit,
            _ => KeyOutcome::Edited,
        }
    }

    fn push(&mut self, c: char) -> KeyOutcome {
        if self.buffer.len() < MAX_PENDING {
            self.buffer.push(c);
        }
        KeyOutcome::Edited
    }
}

/// The wire's printable rule for typed characters: ASCII `32..=126`.
fn is_printable(c: char) -> bool {
    c.is_ascii() && !c.is_ascii_control()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_append_to_buffer() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::Char('h'));
        input.handle_key(KeyCode::Char('i'));
        assert_eq!(input.buffer(), "hi");
    }

    #[test]
    fn backspace_removes_last_char() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::Char('a'));
        input.handle_key(KeyCode::Char('b'));
        input.handle_key(KeyCode::Backspace);
        assert_eq!(input.buffer(), "a");
    }

    #[test]
    fn backspace_on_empty_is_harmless() {
        let mut input = InputState::new();
        assert_eq!(input.handle_key(KeyCode::Backspace), KeyOutcome::Edited);
        assert_eq!(input.buffer(), "");
    }

    #[test]
    fn enter_submits_and_clears() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::Char('y'));
        input.handle_key(KeyCode::Char('o'));

        assert_eq!(input.handle_key(KeyCode::Enter), KeyOutcome::Submit("yo".into()));
        assert_eq!(input.buffer(), "");
    }

    #[test]
    fn enter_on_empty_sends_nothing() {
        let mut input = InputState::new();
        assert_eq!(input.handle_key(KeyCode::Enter), KeyOutcome::Edited);
    }

    #[test]
    fn non_printable_chars_are_dropped() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::Char('\u{1b}'));
        input.handle_key(KeyCode::Char('\u{e9}'));
        input.handle_key(KeyCode::Char('x'));
        assert_eq!(input.buffer(), "x");
    }

    #[test]
    fn tab_key_appends_a_tab() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::Char('a'));
        input.handle_key(KeyCode::Tab);
        input.handle_key(KeyCode::Char('b'));

        assert_eq!(input.buffer(), "a\tb");
        assert!(partyline_proto::validate_body(input.buffer()).is_ok());
    }

    #[test]
    fn overflow_beyond_capacity_is_ignored() {
        let mut input = InputState::new();
        for _ in 0..MAX_PENDING + 25 {
            input.handle_key(KeyCode::Char('a'));
        }
        assert_eq!(input.buffer().len(), MAX_PENDING);
    }

    #[test]
    fn esc_quits() {
        let mut input = InputState::new();
        assert_eq!(input.handle_key(KeyCode::Esc), KeyOutcome::Quit);
    }
}
