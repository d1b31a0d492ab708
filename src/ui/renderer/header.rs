//! Header bar: title and exchange indicator.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::constants::TITLE;
use crate::ui::state::AppState;
use crate::utils::spinner_char;

use super::helpers::badge;

pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),    // Title
            Constraint::Length(16), // Exchange indicator
        ])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled("●", Style::default().fg(t.accent)),
        Span::raw(" "),
        Span::styled(TITLE, t.header_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(title, chunks[0]);

    let indicator = if state.conversation.is_in_flight() {
        badge(
            &format!(" {} 送信中 ", spinner_char(state.tick_count)),
            t.warning,
            t,
        )
    } else {
        Span::styled("● 待機中 ", Style::default().fg(t.success))
    };
    let indicator = Paragraph::new(Line::from(indicator))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(t.border_style()),
        );
    frame.render_widget(indicator, chunks[1]);
}
