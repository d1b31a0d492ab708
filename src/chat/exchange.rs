//! The outbound exchange and its guaranteed-settle guard.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::client::{ChatClient, ChatReply};
use super::error::ChatError;

/// Result of one exchange, delivered exactly once to the UI loop.
pub type Outcome = Result<ChatReply, ChatError>;

/// Held for the lifetime of one outbound request.
///
/// Either `settle` delivers the real outcome, or dropping the guard
/// delivers `ChatError::Abandoned`. The receiving side clears the
/// in-flight flag on every outcome, so the flag cannot stay stuck.
pub struct InFlight {
    tx: Option<mpsc::UnboundedSender<Outcome>>,
}

impl InFlight {
    pub fn acquire(tx: mpsc::UnboundedSender<Outcome>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn settle(mut self, outcome: Outcome) {
        if let Some(tx) = self.tx.take() {
            if tx.send(outcome).is_err() {
                tracing::debug!("outcome receiver dropped before exchange settled");
            }
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            tracing::warn!("exchange dropped without settling");
            let _ = tx.send(Err(ChatError::Abandoned));
        }
    }
}

/// Spawn the POST for `message` on the runtime; the outcome arrives on `tx`.
pub fn spawn_exchange(
    client: ChatClient,
    message: String,
    tx: mpsc::UnboundedSender<Outcome>,
) -> JoinHandle<()> {
    let guard = InFlight::acquire(tx);
    tokio::spawn(async move {
        tracing::info!(
            endpoint = client.endpoint(),
            chars = message.chars().count(),
            "sending message"
        );
        let outcome = client.send(&message).await;
        guard.settle(outcome);
    })
}
