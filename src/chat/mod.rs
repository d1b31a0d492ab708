mod client;
mod conversation;
mod error;
mod exchange;
mod message;

pub use client::{ChatClient, ChatReply};
pub use conversation::ConversationState;
pub use error::ChatError;
pub use exchange::{spawn_exchange, Outcome};
pub use message::{ChatMessage, Sender};

#[cfg(test)]
pub(crate) mod mock_server;
