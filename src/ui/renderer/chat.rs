//! Conversation history: one row per message, plus the processing row.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::chat::{ChatMessage, Sender};
use crate::constants::{BOT_BADGE, MESSAGE_INDENT, PROCESSING_TEXT, USER_BADGE};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use crate::utils::spinner_char;

use super::helpers::{badge, render_scrollbar};

fn history_block(state: &AppState) -> Block<'static> {
    let t = &state.theme;
    let border_style = if state.conversation.is_in_flight() {
        Style::default().fg(t.bot_accent)
    } else {
        t.border_style()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Width available to message text inside a history pane of `inner_width`.
fn wrap_width(inner_width: u16) -> usize {
    inner_width.saturating_sub(4).max(1) as usize
}

fn sender_header(msg: &ChatMessage, t: &Theme) -> Line<'static> {
    let label = match msg.sender() {
        Sender::User => USER_BADGE,
        Sender::Bot => BOT_BADGE,
    };
    Line::from(vec![
        badge(label, t.sender_accent(msg.sender()), t),
        Span::styled(
            format!("  {}", msg.sent_at().format("%H:%M")),
            Style::default().fg(t.text_muted),
        ),
    ])
}

/// Every visual line of the history at the given inner width.
///
/// Message text is split on `\n` first, then each piece is soft-wrapped.
/// While a request is in flight a processing row is appended; it is drawn
/// only and never part of the conversation.
pub fn history_lines(state: &AppState, inner_width: u16) -> Vec<Line<'static>> {
    let t = &state.theme;
    let width = wrap_width(inner_width);
    let mut lines = Vec::new();

    for msg in state.conversation.messages() {
        lines.push(sender_header(msg, t));
        let style = t.sender_text_style(msg.sender());
        for text_line in msg.lines() {
            for wrapped in textwrap::wrap(text_line, width) {
                lines.push(Line::from(vec![
                    Span::raw(MESSAGE_INDENT),
                    Span::styled(wrapped.into_owned(), style),
                ]));
            }
        }
        lines.push(Line::raw(""));
    }

    if state.conversation.is_in_flight() {
        lines.push(Line::from(vec![badge(BOT_BADGE, t.bot_accent, t)]));
        lines.push(Line::from(vec![
            Span::raw(MESSAGE_INDENT),
            Span::styled(
                format!("{} {}", spinner_char(state.tick_count), PROCESSING_TEXT),
                Style::default()
                    .fg(t.bot_accent)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]));
    }

    lines
}

/// How many lines the history can be scrolled back when drawn into `area`.
pub fn max_scroll_back(state: &AppState, area: Rect) -> usize {
    let inner = history_block(state).inner(area);
    history_lines(state, inner.width).len().saturating_sub(inner.height as usize)
}

pub fn render_history(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = history_block(state);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = history_lines(state, inner.width);
    let visible_height = inner.height as usize;
    let total_lines = lines.len();
    let bottom = total_lines.saturating_sub(visible_height);
    let scroll = bottom.saturating_sub(state.scroll_back);

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .skip(scroll)
        .take(visible_height)
        .collect();

    frame.render_widget(Paragraph::new(visible_lines), inner);

    render_scrollbar(frame, inner, total_lines, scroll);
}
