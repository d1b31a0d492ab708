//! Bottom status bar: keybinds, theme, scroll state, endpoint.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::state::AppState;

use super::helpers::{badge, truncate_width};

pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let dim = |text: &str| -> Span { Span::styled(text.to_string(), Style::default().fg(t.text_dim)) };

    let mut spans = vec![
        Span::raw(" "),
        badge(" Esc ", t.accent, t),
        dim(" 終了 "),
        badge(" ↑↓ ", t.accent, t),
        dim(" スクロール "),
        badge(" ^T ", t.accent, t),
        dim(&format!(" Theme: {} ", t.name)),
    ];

    if !state.is_following() {
        spans.push(Span::styled(
            format!(" ↑{} ", state.scroll_back),
            Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
        ));
    }

    let endpoint_width = area.width / 3;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(endpoint_width)])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    let endpoint = truncate_width(&state.endpoint, endpoint_width.saturating_sub(1) as usize);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("{} ", endpoint),
            Style::default().fg(t.text_muted),
        )))
        .alignment(Alignment::Right),
        chunks[1],
    );
}
