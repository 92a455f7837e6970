//! Mention scanning.
//!
//! Splits a received message body into plain and mention segments by
//! scanning for literal `@<username>` occurrences, left to right and
//! non-overlapping. Both renderers consume the same segmentation, so line
//! mode and the full screen agree on what counts as a mention.

/// One run of body text, either plain or a highlighted mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The text of this run.
    pub text: &'a str,
    /// True when this run is a `@username` mention of the local user.
    pub mention: bool,
}

/// Split `body` on literal occurrences of `@<username>`.
///
/// Plain runs between mentions keep their original text; empty runs are
/// omitted. A body without mentions comes back as a single plain segment.
pub fn mention_segments<'a>(body: &'a str, username: &str) -> Vec<Segment<'a>> {
    let pattern = format!("@{username}");
    let mut segments = Vec::new();
    let mut rest = body;

    while let Some(at) = rest.find(&pattern) {
        if at > 0 {
            segments.push(Segment { text: &rest[..at], mention: false });
        }
        segments.push(Segment { text: &rest[at..at + pattern.len()], mention: true });
        rest = &rest[at + pattern.len()..];
    }

    if !rest.is_empty() || segments.is_empty() {
        segments.push(Segment { text: rest, mention: false });
    }

    segments
}

/// Number of mention occurrences in `body`. Drives one alert each, unless
/// the client is configured quiet.
pub fn mention_count(body: &str, username: &str) -> usize {
    mention_segments(body, username).iter().filter(|s| s.mention).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_without_mentions_is_one_plain_segment() {
        let segments = mention_segments("hello there", "alice");
        assert_eq!(segments, [Segment { text: "hello there", mention: false }]);
    }

    #[test]
    fn two_mentions_are_highlighted_separately() {
        let segments = mention_segments("hi @alice how are you @alice", "alice");
        assert_eq!(
            segments,
            [
                Segment { text: "hi ", mention: false },
                Segment { text: "@alice", mention: true },
                Segment { text: " how are you ", mention: false },
                Segment { text: "@alice", mention: true },
            ]
        );
        assert_eq!(mention_count("hi @alice how are you @alice", "alice"), 2);
    }

    #[test]
    fn mention_at_start_and_end() {
        let segments = mention_segments("@bob ping @bob", "bob");
        assert_eq!(segments.first(), Some(&Segment { text: "@bob", mention: true }));
        assert_eq!(segments.last(), Some(&Segment { text: "@bob", mention: true }));
    }

    #[test]
    fn other_usernames_are_not_mentions() {
        assert_eq!(mention_count("hi @alicia", "alice"), 1); // literal substring scan
        assert_eq!(mention_count("hi @carol", "alice"), 0);
    }

    #[test]
    fn empty_body_is_one_empty_plain_segment() {
        let segments = mention_segments("", "alice");
        assert_eq!(segments, [Segment { text: "", mention: false }]);
    }

    #[test]
    fn adjacent_mentions() {
        assert_eq!(mention_count("@bob@bob", "bob"), 2);
    }
}
