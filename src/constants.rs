//! Application-wide constants.
//!
//! Fixed conversation strings, backend defaults, timing values and
//! filesystem locations live here so the rest of the crate never carries
//! literals of its own.

use std::path::PathBuf;

// ── Backend ───────────────────────────────────────────────────────
/// Chatbot backend endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5001/chat";
/// `user_id` sent with every request.
pub const DEFAULT_USER_ID: &str = "web";
/// Request timeout in seconds (0 = no timeout).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 0;

// ── Conversation text ─────────────────────────────────────────────
/// Bot greeting seeded into every new conversation.
pub const GREETING: &str = "お問い合わせ内容を入力してください";
/// Shown when the backend answers 2xx without a usable `response` field.
pub const MISSING_RESPONSE_TEXT: &str = "サーバーからのレスポンスが不正です";
/// Shown for any failed exchange (bad status, transport, decode).
pub const COMMUNICATION_ERROR_TEXT: &str =
    "サーバーとの通信に失敗しました。時間をおいて再度お試しください";
/// Ephemeral row drawn while a request is in flight.
pub const PROCESSING_TEXT: &str = "入力内容から内容を作成しています...";

// ── UI labels ─────────────────────────────────────────────────────
pub const TITLE: &str = "大会チャットボット";
pub const INPUT_PLACEHOLDER: &str = "例）試合会場はどこですか？";
pub const SEND_LABEL: &str = " 送信 ";
pub const SENDING_LABEL: &str = " 送信中... ";
pub const USER_BADGE: &str = " あなた ";
pub const BOT_BADGE: &str = " Bot ";

// ── Timing ────────────────────────────────────────────────────────
/// Event poll timeout (ms) -- how often the UI checks for input.
pub const EVENT_POLL_MS: u64 = 50;
/// Poll iterations per animation frame of the spinner.
pub const ANIMATION_TICKS: u64 = 6;

// ── UI Layout ─────────────────────────────────────────────────────
/// Page up/down step size.
pub const PAGE_SIZE: usize = 10;
/// Mouse wheel scroll step.
pub const MOUSE_SCROLL_STEP: usize = 3;
/// Height of the input box including borders.
pub const INPUT_BOX_HEIGHT: u16 = 5;
/// Left indent of message body lines.
pub const MESSAGE_INDENT: &str = "  ";

// ── Animations ────────────────────────────────────────────────────
pub const SPINNER_CHARS: &[&str] = &["◐", "◓", "◑", "◒"];

// ── Paths ─────────────────────────────────────────────────────────

pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.config/taikai-chat/`.
pub fn config_dir() -> PathBuf {
    home_dir().join(".config").join("taikai-chat")
}

/// Returns `~/.config/taikai-chat/config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns `~/.config/taikai-chat/themes/<name>.toml`.
pub fn custom_theme_path(name: &str) -> PathBuf {
    config_dir().join("themes").join(format!("{}.toml", name))
}

/// Returns `~/.local/share/taikai-chat/`.
pub fn data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("taikai-chat")
}

/// Returns `~/.local/share/taikai-chat/taikai-chat.log`.
pub fn default_log_path() -> PathBuf {
    data_dir().join("taikai-chat.log")
}
