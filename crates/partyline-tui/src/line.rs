//! Line mode: a scrolling log on a cooked terminal.
//!
//! Blocks on whole lines of standard input and prints inbound messages as
//! they arrive, with ANSI styling. Outbound lines are validated locally;
//! rejected lines produce a diagnostic and never reach the wire.

use anyhow::Result;
use crossterm::style::Stylize;
use partyline_client::{SessionEvent, SessionWriter, ShutdownReason};
use partyline_proto::{Message, validate_body};
use tokio::{
    io::{AsyncBufReadExt, AsyncWrite, BufReader},
    sync::mpsc,
};

use crate::{config::Config, highlight, signals, timefmt};

/// Run the line-mode input/render loop until the session ends.
pub async fn run<W>(
    writer: &mut SessionWriter<W>,
    events: &mut mpsc::Receiver<SessionEvent>,
    config: &Config,
) -> Result<ShutdownReason>
where
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = signals::terminated();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    let line = line.trim_end_matches('\r');
                    if line.is_empty() {
                        continue;
                    }
                    match validate_body(line) {
                        Ok(()) => {
                            let message = Message::send(&config.username, line);
                            if let Err(error) = writer.send(&message).await {
                                return Ok(ShutdownReason::Transport(error));
                            }
                        },
                        Err(reason) => eprintln!("{} {reason}", "rejected:".red()),
                    }
                },
                Ok(None) => return Ok(ShutdownReason::EndOfInput),
                Err(error) => {
                    tracing::debug!(%error, "stdin read failed");
                    return Ok(ShutdownReason::EndOfInput);
                },
            },

            event = events.recv() => match event {
                Some(SessionEvent::Broadcast(message)) => print_broadcast(&message, config),
                Some(SessionEvent::Notice(message)) => {
                    println!("{}", format!("[SYSTEM]: {}", message.body).dark_grey());
                },
                Some(SessionEvent::Disconnected(message)) => {
                    println!("{}", format!("[DISCONNECT] {}", message.body).red());
                    return Ok(ShutdownReason::PeerDisconnect);
                },
                Some(SessionEvent::Closed) | None => {
                    println!("{}", "[connection closed by server]".red());
                    return Ok(ShutdownReason::StreamClosed);
                },
                Some(SessionEvent::Failed(error)) => return Ok(ShutdownReason::Transport(error)),
            },

            _ = &mut shutdown => return Ok(ShutdownReason::Signal),
        }
    }
}

/// Print one broadcast line with sender styling and mention highlighting.
fn print_broadcast(message: &Message, config: &Config) {
    println!("{}", render_broadcast(message, config));
}

/// Build the styled broadcast line.
///
/// Each mention occurrence carries one BEL unless the client is quiet, so
/// the alert count always equals the highlight count.
fn render_broadcast(message: &Message, config: &Config) -> String {
    let sender = if message.username == config.username {
        message.username.as_str().green()
    } else {
        message.username.as_str().cyan()
    };

    let mut body = String::new();
    for segment in highlight::mention_segments(&message.body, &config.username) {
        if segment.mention {
            if !config.quiet {
                body.push('\u{7}');
            }
            body.push_str(&segment.text.red().bold().to_string());
        } else {
            body.push_str(segment.text);
        }
    }

    format!("[{}] {}: {}", timefmt::clock_time(message.timestamp), sender, body)
}

#[cfg(test)]
mod tests {
    use partyline_proto::MessageKind;

    use super::*;

    fn broadcast(body: &str) -> Message {
        Message {
            kind: MessageKind::Receive,
            timestamp: 0,
            username: "carol".into(),
            body: body.into(),
        }
    }

    fn config(quiet: bool) -> Config {
        Config { username: "alice".into(), quiet }
    }

    #[test]
    fn alerts_once_per_mention_occurrence() {
        let line = render_broadcast(&broadcast("hi @alice how are you @alice"), &config(false));
        assert_eq!(line.matches('\u{7}').count(), 2);
    }

    #[test]
    fn quiet_suppresses_alerts_but_keeps_highlighting() {
        let line = render_broadcast(&broadcast("hi @alice how are you @alice"), &config(true));
        assert_eq!(line.matches('\u{7}').count(), 0);
        assert_eq!(line.matches("@alice").count(), 2);
    }

    #[test]
    fn no_mentions_means_no_alerts() {
        let line = render_broadcast(&broadcast("hello everyone"), &config(false));
        assert_eq!(line.matches('\u{7}').count(), 0);
        assert!(line.contains("hello everyone"));
    }
}
