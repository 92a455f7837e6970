//! Bounded, order-preserving message history.
//!
//! Insertion order is arrival order; at capacity the single oldest entry is
//! evicted before the newest is appended. Only the screen event loop ever
//! mutates a `History`, so no locking is needed.

use std::collections::VecDeque;

use partyline_proto::Message;

/// Default number of messages retained for scroll-back.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Bounded FIFO store of received (or locally echoed) messages.
#[derive(Debug)]
pub struct History {
    messages: VecDeque<Message>,
    capacity: usize,
}

impl History {
    /// Create a history bounded to [`DEFAULT_CAPACITY`] entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a history bounded to `capacity` entries.
    ///
    /// A zero capacity is clamped to one; a history that can hold nothing
    /// has no meaningful eviction order.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { messages: VecDeque::with_capacity(capacity), capacity }
    }

    /// Append a message, evicting the oldest entry if at capacity.
    pub fn append(&mut self, message: Message) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// The most recent `max_rows` messages, in arrival order.
    ///
    /// A non-owning view, recomputed from scratch on every render so the
    /// window tracks the current terminal size.
    pub fn visible_window(&self, max_rows: usize) -> impl Iterator<Item = &Message> {
        let skip = self.messages.len().saturating_sub(max_rows);
        self.messages.iter().skip(skip)
    }

    /// Number of stored messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use partyline_proto::MessageKind;

    use super::*;

    fn broadcast(body: &str) -> Message {
        Message {
            kind: MessageKind::Receive,
            timestamp: 0,
            username: "u".into(),
            body: body.into(),
        }
    }

    #[test]
    fn append_preserves_arrival_order() {
        let mut history = History::with_capacity(10);
        history.append(broadcast("a"));
        history.append(broadcast("b"));
        history.append(broadcast("c"));

        let bodies: Vec<_> = history.visible_window(10).map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, ["a", "b", "c"]);
    }

    #[test]
    fn eviction_drops_exactly_the_oldest() {
        let capacity = 5;
        let mut history = History::with_capacity(capacity);
        for i in 0..=capacity {
            history.append(broadcast(&i.to_string()));
        }

        assert_eq!(history.len(), capacity);
        let bodies: Vec<_> = history.visible_window(capacity).map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn window_returns_most_recent_rows() {
        let mut history = History::with_capacity(10);
        for i in 0..6 {
            history.append(broadcast(&i.to_string()));
        }

        let bodies: Vec<_> = history.visible_window(3).map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, ["3", "4", "5"]);
    }

    #[test]
    fn window_larger_than_history_returns_all() {
        let mut history = History::with_capacity(10);
        history.append(broadcast("only"));

        assert_eq!(history.visible_window(100).count(), 1);
    }
}
