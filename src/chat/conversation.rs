use super::client::ChatReply;
use super::error::ChatError;
use super::exchange::Outcome;
use super::message::ChatMessage;
use crate::constants::{COMMUNICATION_ERROR_TEXT, GREETING};

/// Everything the chat view shows: history, the input buffer and whether a
/// request is outstanding.
///
/// All transitions are plain methods so they can be driven without a
/// terminal. At most one request may be in flight; `submit` refuses to start
/// another until `on_response` or `on_error` has run.
#[derive(Debug)]
pub struct ConversationState {
    messages: Vec<ChatMessage>,
    input: String,
    /// Byte offset into `input`, always on a char boundary.
    cursor_pos: usize,
    in_flight: bool,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::bot(GREETING)],
            input: String::new(),
            cursor_pos: 0,
            in_flight: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether `submit` would currently be accepted.
    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.input.trim().is_empty()
    }

    // ── Transitions ───────────────────────────────────────────────

    /// Move the input into history and mark a request as in flight.
    ///
    /// Returns the trimmed text to send, or `None` when the input is blank
    /// or a request is already outstanding (in which case nothing changes).
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        let text = self.input.trim().to_string();
        self.messages.push(ChatMessage::user(&text));
        self.input.clear();
        self.cursor_pos = 0;
        self.in_flight = true;
        Some(text)
    }

    pub fn on_response(&mut self, reply: &ChatReply) {
        self.messages.push(ChatMessage::bot(reply.text()));
        self.in_flight = false;
    }

    pub fn on_error(&mut self, err: &ChatError) {
        tracing::error!(error = %err, "chat request failed");
        self.messages.push(ChatMessage::bot(COMMUNICATION_ERROR_TEXT));
        self.in_flight = false;
    }

    /// Apply the outcome of an exchange.
    pub fn settle(&mut self, outcome: Outcome) {
        match outcome {
            Ok(reply) => self.on_response(&reply),
            Err(err) => self.on_error(&err),
        }
    }

    // ── Input editing ─────────────────────────────────────────────

    /// Replace the whole input buffer, cursor at the end.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.cursor_pos = self.input.len();
    }

    pub fn input_char(&mut self, c: char) {
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn input_backspace(&mut self) {
        if self.cursor_pos > 0 {
            let prev = self.prev_boundary();
            self.input.remove(prev);
            self.cursor_pos = prev;
        }
    }

    pub fn input_delete(&mut self) {
        if self.cursor_pos < self.input.len() {
            self.input.remove(self.cursor_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_pos = self.prev_boundary();
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_pos < self.input.len() {
            self.cursor_pos = self.input[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.input.len());
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.input.len();
    }

    fn prev_boundary(&self) -> usize {
        self.input[..self.cursor_pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}
