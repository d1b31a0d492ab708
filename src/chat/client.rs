use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::error::ChatError;
use crate::config::Config;
use crate::constants::MISSING_RESPONSE_TEXT;

/// Body of the outbound POST.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    user_id: &'a str,
}

/// Body of a 2xx reply from the backend.
///
/// `response` is kept loosely typed: anything other than a non-empty string
/// renders as the fixed fallback text.
#[derive(Debug, Clone, Default)]
pub struct ChatReply {
    response: Option<Value>,
}

impl ChatReply {
    /// Build a reply from a decoded body.
    ///
    /// Only an object can carry `response`; strings, numbers, booleans and
    /// arrays decode fine but yield the fallback text. A `null` body has no
    /// fields to read and is rejected.
    pub fn from_body(body: Value) -> Result<Self, ChatError> {
        if body.is_null() {
            return Err(ChatError::NullBody);
        }
        Ok(Self {
            response: body.get("response").cloned(),
        })
    }

    #[cfg(test)]
    pub fn new(text: &str) -> Self {
        Self {
            response: Some(Value::String(text.to_string())),
        }
    }

    /// Text to show for this reply.
    pub fn text(&self) -> &str {
        match &self.response {
            Some(Value::String(s)) if !s.is_empty() => s,
            _ => MISSING_RESPONSE_TEXT,
        }
    }
}

/// HTTP client for the chatbot backend.
///
/// One `send` is one POST; there are no retries. Cloning is cheap and
/// shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
    user_id: String,
}

impl ChatClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            user_id: config.user_id.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `message` to the backend and decode the reply.
    pub async fn send(&self, message: &str) -> Result<ChatReply, ChatError> {
        let body = ChatRequest {
            message,
            user_id: &self.user_id,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        tracing::debug!(status = status.as_u16(), "backend replied");
        ChatReply::from_body(body)
    }
}
