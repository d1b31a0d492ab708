use thiserror::Error;

/// Why an exchange with the chatbot backend failed.
///
/// The variants only matter for logs; every one of them is shown to the
/// user as the same fixed communication-error message.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response body is null")]
    NullBody,

    #[error("request task ended without an outcome")]
    Abandoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_names_code() {
        assert_eq!(ChatError::Status(502).to_string(), "HTTP error! status: 502");
    }

    #[test]
    fn decode_converts_from_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let chat_err: ChatError = err.into();
        assert!(matches!(chat_err, ChatError::Decode(_)));
    }
}
