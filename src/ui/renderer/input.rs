//! Input box: editable buffer, placeholder and the send hint.

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::constants::{INPUT_PLACEHOLDER, SENDING_LABEL, SEND_LABEL};
use crate::ui::state::AppState;
use crate::utils::tail_start;

use super::helpers::badge;

/// The slice of the input buffer that fits a `width` x `rows` box, and the
/// cursor cell relative to the box.
#[derive(Debug, PartialEq, Eq)]
pub struct InputView<'a> {
    pub lines: Vec<&'a str>,
    pub cursor: (u16, u16),
}

/// Keep the cursor's line in view, scrolling vertically over `\n`-separated
/// lines and horizontally within the cursor line.
pub fn input_view(input: &str, cursor_pos: usize, width: u16, rows: u16) -> InputView<'_> {
    let rows = rows.max(1) as usize;
    let before = &input[..cursor_pos];
    let cursor_row = before.matches('\n').count();
    let col_text = before.rsplit('\n').next().unwrap_or("");

    let first = (cursor_row + 1).saturating_sub(rows);
    let mut lines = Vec::with_capacity(rows);
    let mut cursor_x = 0;
    for (idx, line) in input.split('\n').enumerate().skip(first).take(rows) {
        if idx == cursor_row {
            let start = tail_start(col_text, width as usize);
            cursor_x = col_text[start..].width();
            lines.push(&line[start..]);
        } else {
            lines.push(line);
        }
    }

    InputView {
        lines,
        cursor: (cursor_x as u16, (cursor_row - first) as u16),
    }
}

pub fn render_input(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let conversation = &state.conversation;
    let busy = conversation.is_in_flight();

    let border_style = if conversation.can_submit() {
        t.border_highlight_style()
    } else {
        t.border_style()
    };
    let block = Block::default()
        .title(Span::styled(" メッセージ ", Style::default().fg(t.accent)))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text_rows = inner.height.saturating_sub(1);
    let mut lines: Vec<Line> = Vec::new();

    if conversation.input().is_empty() {
        lines.push(Line::from(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(t.text_muted),
        )));
        for _ in 1..text_rows {
            lines.push(Line::raw(""));
        }
        frame.set_cursor_position(Position::new(inner.x, inner.y));
    } else {
        let view = input_view(
            conversation.input(),
            conversation.cursor_pos(),
            inner.width,
            text_rows,
        );
        for line in &view.lines {
            lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(t.text_primary),
            )));
        }
        for _ in view.lines.len()..text_rows as usize {
            lines.push(Line::raw(""));
        }
        frame.set_cursor_position(Position::new(
            inner.x + view.cursor.0,
            inner.y + view.cursor.1,
        ));
    }

    // Send hint, mirroring the state of a send button
    let send = if busy {
        Span::styled(
            SENDING_LABEL,
            Style::default()
                .fg(t.warning)
                .add_modifier(Modifier::BOLD),
        )
    } else if conversation.can_submit() {
        badge(SEND_LABEL, t.accent, t)
    } else {
        Span::styled(SEND_LABEL, Style::default().fg(t.text_muted))
    };
    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(t.text_dim)),
        Span::raw(" "),
        send,
        Span::styled("  Alt+Enter 改行", Style::default().fg(t.text_dim)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_cursor_at_end() {
        let v = input_view("hello", 5, 20, 2);
        assert_eq!(v.lines, vec!["hello"]);
        assert_eq!(v.cursor, (5, 0));
    }

    #[test]
    fn cursor_mid_line() {
        let v = input_view("hello", 2, 20, 2);
        assert_eq!(v.cursor, (2, 0));
    }

    #[test]
    fn wide_chars_advance_two_columns() {
        let s = "会場";
        let v = input_view(s, s.len(), 20, 2);
        assert_eq!(v.cursor, (4, 0));
    }

    #[test]
    fn multiline_shows_cursor_row() {
        let s = "one\ntwo\nthree";
        let v = input_view(s, s.len(), 20, 2);
        assert_eq!(v.lines, vec!["two", "three"]);
        assert_eq!(v.cursor, (5, 1));
    }

    #[test]
    fn cursor_on_first_line_shows_top() {
        let s = "one\ntwo\nthree";
        let v = input_view(s, 1, 20, 2);
        assert_eq!(v.lines, vec!["one", "two"]);
        assert_eq!(v.cursor, (1, 0));
    }

    #[test]
    fn trailing_newline_puts_cursor_on_empty_row() {
        let s = "one\n";
        let v = input_view(s, s.len(), 20, 2);
        assert_eq!(v.lines, vec!["one", ""]);
        assert_eq!(v.cursor, (0, 1));
    }

    #[test]
    fn long_line_scrolls_horizontally() {
        let s = "abcdefghij";
        let v = input_view(s, s.len(), 5, 1);
        assert_eq!(v.lines, vec!["ghij"]);
        assert_eq!(v.cursor, (4, 0));
    }
}
