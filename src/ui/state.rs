use crate::chat::ConversationState;
use crate::constants::PAGE_SIZE;

use super::theme::Theme;

/// Everything the renderer reads.
pub struct AppState {
    pub conversation: ConversationState,
    pub theme: Theme,
    /// Backend URL shown in the status bar.
    pub endpoint: String,
    /// Lines scrolled back from the newest line (0 = follow the bottom).
    pub scroll_back: usize,
    /// Largest useful `scroll_back` for the last drawn frame.
    pub max_scroll_back: usize,
    pub tick_count: u64,
}

impl AppState {
    pub fn new(theme: Theme, endpoint: &str) -> Self {
        Self {
            conversation: ConversationState::new(),
            theme,
            endpoint: endpoint.to_string(),
            scroll_back: 0,
            max_scroll_back: 0,
            tick_count: 0,
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next_builtin();
        tracing::debug!(theme = %self.theme.name, "switched theme");
    }

    // ── Scrolling ──────────────────────────────────────────────

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_back = (self.scroll_back + lines).min(self.max_scroll_back);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(PAGE_SIZE);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(PAGE_SIZE);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_back = 0;
    }

    pub fn is_following(&self) -> bool {
        self.scroll_back == 0
    }

    /// Record how far the history can scroll at the current size.
    pub fn set_max_scroll_back(&mut self, max: usize) {
        self.max_scroll_back = max;
        self.scroll_back = self.scroll_back.min(max);
    }
}
