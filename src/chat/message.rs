use chrono::{DateTime, Local};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// A single turn in the conversation.
///
/// Fields are private so a message cannot change after it has been appended.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    sender: Sender,
    text: String,
    sent_at: DateTime<Local>,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: &str) -> Self {
        Self::new(Sender::Bot, text)
    }

    fn new(sender: Sender, text: &str) -> Self {
        Self {
            sender,
            text: text.to_string(),
            sent_at: Local::now(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sent_at(&self) -> DateTime<Local> {
        self.sent_at
    }

    /// The text split into display lines on `\n`.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}
