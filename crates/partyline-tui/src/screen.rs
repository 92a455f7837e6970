//! Full-screen mode.
//!
//! Raw-mode event loop over keyboard input and session events. Every
//! keystroke and every inbound message triggers a full redraw; the terminal
//! is restored (raw mode off, alternate screen left) on drop, whichever way
//! the loop exits.

use std::io::{Stdout, Write, stdout};

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use partyline_client::{History, SessionEvent, SessionWriter, ShutdownReason};
use partyline_proto::Message;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{io::AsyncWrite, sync::mpsc};

use crate::{
    config::Config,
    highlight,
    input::{InputState, KeyOutcome},
    signals, ui,
};

/// Render-side state for the full screen: the scroll-back history and the
/// pending input line.
pub struct ScreenApp {
    /// Bounded scroll-back, appended on every inbound event.
    pub history: History,
    /// Not-yet-submitted keystrokes.
    pub input: InputState,
    /// Local username, for sender styling and mention scanning.
    pub username: String,
}

/// Terminal handle that owns the raw-mode/alternate-screen transition.
struct ScreenGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl ScreenGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal })
    }

    fn render(&mut self, app: &ScreenApp) -> Result<()> {
        self.terminal.draw(|frame| ui::render(frame, app))?;
        Ok(())
    }

    /// Emit one BEL per mention occurrence.
    fn alert(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        let mut out = stdout();
        for _ in 0..count {
            out.write_all(b"\x07")?;
        }
        out.flush()?;
        Ok(())
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Run the full-screen input/render loop until the session ends.
pub async fn run<W>(
    writer: &mut SessionWriter<W>,
    events: &mut mpsc::Receiver<SessionEvent>,
    config: &Config,
) -> Result<ShutdownReason>
where
    W: AsyncWrite + Unpin,
{
    let mut screen = ScreenGuard::new()?;
    let mut app = ScreenApp {
        history: History::new(),
        input: InputState::new(),
        username: config.username.clone(),
    };
    let mut keys = EventStream::new();
    let shutdown = signals::terminated();
    tokio::pin!(shutdown);

    screen.render(&app)?;

    loop {
        tokio::select! {
            maybe_event = keys.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match app.input.handle_key(key.code) {
                        KeyOutcome::Submit(body) => {
                            let message = Message::send(&config.username, &body);
                            if let Err(error) = writer.send(&message).await {
                                return Ok(ShutdownReason::Transport(error));
                            }
                        },
                        KeyOutcome::Quit => return Ok(ShutdownReason::UserQuit),
                        KeyOutcome::Edited => {},
                    }
                    screen.render(&app)?;
                },
                Some(Ok(Event::Resize(_, _))) => screen.render(&app)?,
                Some(Ok(_)) => {},
                Some(Err(error)) => return Err(error.into()),
                None => return Ok(ShutdownReason::EndOfInput),
            },

            event = events.recv() => match event {
                Some(SessionEvent::Broadcast(message)) => {
                    if !config.quiet {
                        screen.alert(highlight::mention_count(&message.body, &config.username))?;
                    }
                    app.history.append(message);
                    screen.render(&app)?;
                },
                Some(SessionEvent::Notice(message)) => {
                    app.history.append(message);
                    screen.render(&app)?;
                },
                Some(SessionEvent::Disconnected(message)) => {
                    // Leave the notice on screen in scroll-back; the peer
                    // already knows, so shutdown sends nothing.
                    app.history.append(message);
                    screen.render(&app)?;
                    return Ok(ShutdownReason::PeerDisconnect);
                },
                Some(SessionEvent::Closed) | None => return Ok(ShutdownReason::StreamClosed),
                Some(SessionEvent::Failed(error)) => return Ok(ShutdownReason::Transport(error)),
            },

            _ = &mut shutdown => return Ok(ShutdownReason::Signal),
        }
    }
}
