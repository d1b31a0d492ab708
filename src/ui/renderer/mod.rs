//! Renderer module: split into focused submodules.
//!
//! - `header`: Title bar and exchange indicator
//! - `chat`: Conversation history and the processing row
//! - `input`: Input box with cursor and send hint
//! - `status_bar`: Bottom status bar with keybinds and endpoint
//! - `helpers`: Shared rendering utilities
//!
//! Rendering is a pure projection of `AppState`; nothing here mutates it.

mod chat;
mod header;
pub mod helpers;
mod input;
mod status_bar;

use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::constants::INPUT_BOX_HEIGHT;

use super::state::AppState;

fn split(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                // Header bar
            Constraint::Min(5),                   // Chat history
            Constraint::Length(INPUT_BOX_HEIGHT), // Input box
            Constraint::Length(1),                // Status bar
        ])
        .split(area)
}

/// Top-level render function.
pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = split(frame.area());

    header::render_header(frame, chunks[0], state);
    chat::render_history(frame, chunks[1], state);
    input::render_input(frame, chunks[2], state);
    status_bar::render_status_bar(frame, chunks[3], state);
}

/// How far the history pane can scroll back on a terminal of size `area`.
pub fn max_scroll_back(state: &AppState, area: Rect) -> usize {
    chat::max_scroll_back(state, split(area)[1])
}
