//! Shared rendering helpers: badges, truncation, scrollbar.

use ratatui::{
    layout::Rect,
    style::Color,
    text::Span,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::ui::theme::Theme;

/// A bold inverted label, e.g. a keybind or a sender tag.
pub fn badge<'a>(label: &str, color: Color, t: &Theme) -> Span<'a> {
    Span::styled(label.to_string(), t.badge_style(color))
}

/// Truncate to at most `max_width` display columns, appending "..." if cut.
pub fn truncate_width(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max_width >= 3 {
        out.push_str("...");
    }
    out
}

/// Render a vertical scrollbar on the right side of `area`.
///
/// Only renders if `total > visible_height`.
pub fn render_scrollbar(frame: &mut Frame, area: Rect, total: usize, position: usize) {
    let visible_height = area.height as usize;
    if area.is_empty() || total <= visible_height {
        return;
    }
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("▲"))
        .end_symbol(Some("▼"));
    let mut scrollbar_state = ScrollbarState::new(total.saturating_sub(visible_height))
        .position(position);
    frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_width_short_unchanged() {
        assert_eq!(truncate_width("localhost", 20), "localhost");
    }

    #[test]
    fn truncate_width_cuts_with_ellipsis() {
        assert_eq!(truncate_width("http://example.com/chat", 10), "http://...");
    }

    #[test]
    fn truncate_width_never_splits_wide_chars() {
        // each char is 2 columns; budget 7 - 3 = 4 → two chars
        assert_eq!(truncate_width("大会チャット", 7), "大会...");
    }

    #[test]
    fn scrollbar_spans_full_area_height() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut terminal = Terminal::new(TestBackend::new(6, 4)).unwrap();
        terminal
            .draw(|frame| render_scrollbar(frame, Rect::new(0, 0, 6, 4), 10, 0))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(5, 0)].symbol(), "▲");
        assert_eq!(buffer[(5, 3)].symbol(), "▼");
        assert_eq!(buffer[(0, 0)].symbol(), " ");
    }

    #[test]
    fn scrollbar_hidden_when_content_fits() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut terminal = Terminal::new(TestBackend::new(6, 4)).unwrap();
        terminal
            .draw(|frame| render_scrollbar(frame, Rect::new(0, 0, 6, 4), 4, 0))
            .unwrap();
        assert_eq!(terminal.backend().buffer()[(5, 0)].symbol(), " ");
    }

    #[test]
    fn truncate_width_tiny_budget() {
        assert_eq!(truncate_width("abcdef", 2), "");
    }
}
