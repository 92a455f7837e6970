//! Full-screen rendering.
//!
//! Pure functions from screen state to ratatui widgets. The layout is
//! recomputed from the live terminal size on every draw: the history list
//! gets `height - 2` rows, then a status line, then the prompt region on
//! the last line.

use partyline_proto::{Message, MessageKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use crate::{highlight, screen::ScreenApp, timefmt};

const STATUS_HEIGHT: u16 = 1;
const PROMPT_HEIGHT: u16 = 1;
const PROMPT_WIDTH: u16 = 2; // "> "

/// Render the entire screen.
pub fn render(frame: &mut Frame, app: &ScreenApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(PROMPT_HEIGHT),
        ])
        .split(frame.area());

    let [history_area, status_area, prompt_area] = chunks.as_ref() else {
        return;
    };

    render_history(frame, app, *history_area);
    render_status(frame, app, *status_area);
    render_prompt(frame, app, *prompt_area);
}

/// Render the visible history window.
fn render_history(frame: &mut Frame, app: &ScreenApp, area: Rect) {
    let rows = area.height as usize;
    let items: Vec<ListItem> = app
        .history
        .visible_window(rows)
        .map(|message| ListItem::new(message_line(message, &app.username)))
        .collect();

    frame.render_widget(List::new(items), area);
}

/// One rendered history line, styled by kind.
///
/// Broadcast senders get one style when they are the local user and another
/// otherwise; mentions of the local user are highlighted within the body.
/// System and disconnect notices have their own styles and are never
/// mention-scanned.
pub fn message_line<'a>(message: &'a Message, local_username: &str) -> Line<'a> {
    match message.kind {
        MessageKind::Receive => {
            let user_color = if message.username == local_username {
                Color::Green
            } else {
                Color::Cyan
            };

            let mut spans = vec![
                Span::styled(
                    format!("[{}] ", timefmt::clock_time(message.timestamp)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    message.username.as_str(),
                    Style::default().fg(user_color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(": "),
            ];
            for segment in highlight::mention_segments(&message.body, local_username) {
                if segment.mention {
                    spans.push(Span::styled(
                        segment.text,
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ));
                } else {
                    spans.push(Span::raw(segment.text));
                }
            }
            Line::from(spans)
        },
        MessageKind::System => Line::from(Span::styled(
            format!("[SYSTEM]: {}", message.body),
            Style::default().fg(Color::Yellow),
        )),
        MessageKind::Disconnect => Line::from(Span::styled(
            format!("[DISCONNECT] {}", message.body),
            Style::default().fg(Color::Red),
        )),
        // Client-only kinds never reach history; render neutrally if one does.
        MessageKind::Login | MessageKind::Logout | MessageKind::Send => {
            Line::from(Span::styled(
                message.body.as_str(),
                Style::default().fg(Color::DarkGray),
            ))
        },
    }
}

/// Render the status separator line.
fn render_status(frame: &mut Frame, app: &ScreenApp, area: Rect) {
    let status = format!(" {} | Enter sends, Esc quits", app.username);
    let paragraph = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Render the reserved prompt region with the pending input line.
fn render_prompt(frame: &mut Frame, app: &ScreenApp, area: Rect) {
    let prompt = format!("> {}", app.input.buffer());
    frame.render_widget(Paragraph::new(prompt), area);

    let cursor_x = area
        .x
        .saturating_add(PROMPT_WIDTH)
        .saturating_add(app.input.buffer().len() as u16)
        .min(area.x.saturating_add(area.width.saturating_sub(1)));
    frame.set_cursor_position((cursor_x, area.y));
}
