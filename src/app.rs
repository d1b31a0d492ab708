//! Application struct and event loop.
//!
//! Owns the state, the backend client and the outcome channel. Terminal
//! setup and teardown live in `run`; everything else is plain methods so
//! the key handling can be driven from tests.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::chat::{spawn_exchange, ChatClient, ConversationState, Outcome};
use crate::config::Config;
use crate::constants::*;
use crate::ui::{self, AppState, Theme};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Main application struct.
pub struct App {
    state: AppState,
    client: ChatClient,
    outcome_tx: mpsc::UnboundedSender<Outcome>,
    outcome_rx: mpsc::UnboundedReceiver<Outcome>,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let client = ChatClient::new(config)?;
        let theme = Theme::resolve(&config.theme);
        let state = AppState::new(theme, client.endpoint());
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel::<Outcome>();

        Ok(Self {
            state,
            client,
            outcome_tx,
            outcome_rx,
        })
    }

    /// Run the main event loop. Returns when the user quits.
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        tracing::info!(endpoint = self.client.endpoint(), "chat session started");
        let result = self.event_loop(&mut terminal);

        // Restore the terminal even when the loop failed
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        tracing::info!("chat session ended");
        result
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        loop {
            let area = terminal
                .draw(|frame| ui::render(frame, &self.state))?
                .area;
            self.state
                .set_max_scroll_back(ui::max_scroll_back(&self.state, area));

            self.drain_outcomes();

            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Paste(text) => self.handle_paste(&text),
                    _ => {}
                }
            }

            self.state.tick_count = self.state.tick_count.wrapping_add(1);
        }
    }

    // ── Exchange ─────────────────────────────────────────────────

    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.state.conversation.settle(outcome);
            self.state.scroll_to_bottom();
        }
    }

    /// Submit the input buffer and, if accepted, start the request.
    fn dispatch(&mut self) {
        if let Some(text) = self.state.conversation.submit() {
            self.state.scroll_to_bottom();
            spawn_exchange(self.client.clone(), text, self.outcome_tx.clone());
        }
    }

    // ── Mouse handling ───────────────────────────────────────────

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.state.scroll_up(MOUSE_SCROLL_STEP),
            MouseEventKind::ScrollDown => self.state.scroll_down(MOUSE_SCROLL_STEP),
            _ => {}
        }
    }

    // ── Paste ────────────────────────────────────────────────────

    /// Insert pasted text at the cursor. Line breaks stay in the buffer
    /// instead of submitting.
    fn handle_paste(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        for c in text.chars() {
            self.state.conversation.input_char(c);
        }
    }

    // ── Keyboard handling ────────────────────────────────────────

    /// Handle a key event. Returns `true` if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let conversation = &mut self.state.conversation;

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Char('t') if ctrl => self.state.cycle_theme(),
            KeyCode::Char('j') if ctrl => conversation.input_char('\n'),
            KeyCode::Enter
                if key
                    .modifiers
                    .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
            {
                conversation.input_char('\n')
            }
            KeyCode::Enter => self.dispatch(),
            KeyCode::Backspace => conversation.input_backspace(),
            KeyCode::Delete => conversation.input_delete(),
            KeyCode::Left => conversation.cursor_left(),
            KeyCode::Right => conversation.cursor_right(),
            KeyCode::Home => conversation.cursor_home(),
            KeyCode::End => conversation.cursor_end(),
            KeyCode::Up => self.state.scroll_up(1),
            KeyCode::Down => self.state.scroll_down(1),
            KeyCode::PageUp => self.state.page_up(),
            KeyCode::PageDown => self.state.page_down(),
            KeyCode::Char(c) if !ctrl => conversation.input_char(c),
            _ => {}
        }
        false
    }
}

/// Send a single message without the TUI and return the bot's reply text.
///
/// Runs the same submit → exchange → settle cycle as the interactive view,
/// so failures come back as the fixed error text rather than an `Err`.
pub async fn run_once(config: &Config, message: &str) -> Result<String> {
    let client = ChatClient::new(config)?;
    let mut conversation = ConversationState::new();
    conversation.set_input(message);
    let text = conversation
        .submit()
        .context("Message is empty; nothing to send")?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_exchange(client, text, tx);
    let outcome = rx
        .recv()
        .await
        .context("Exchange ended without an outcome")?;
    conversation.settle(outcome);

    conversation
        .messages()
        .last()
        .map(|m| m.text().to_string())
        .context("Conversation is empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::mock_server::{serve_once, unreachable_endpoint};
    use crate::chat::Sender;

    fn app_for(endpoint: String) -> App {
        App::new(&Config {
            endpoint,
            ..Config::default()
        })
        .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    /// Wait for the outstanding exchange and apply it.
    async fn settle_next(app: &mut App) {
        let outcome = app.outcome_rx.recv().await.unwrap();
        app.state.conversation.settle(outcome);
    }

    #[tokio::test]
    async fn enter_sends_and_reply_lands() {
        let (endpoint, captured) = serve_once(200, r#"{"response":"明日です"}"#).await;
        let mut app = app_for(endpoint);

        type_text(&mut app, "試合はいつ？");
        assert!(!app.handle_key(key(KeyCode::Enter)));
        assert!(app.state.conversation.is_in_flight());
        assert_eq!(app.state.conversation.input(), "");

        settle_next(&mut app).await;
        let msgs = app.state.conversation.messages();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[1].sender(), Sender::User);
        assert_eq!(msgs[2].text(), "明日です");
        assert!(!app.state.conversation.is_in_flight());
        assert_eq!(captured.await.unwrap().body["message"], "試合はいつ？");
    }

    #[tokio::test]
    async fn second_enter_while_in_flight_is_ignored() {
        let (endpoint, _captured) = serve_once(200, r#"{"response":"ok"}"#).await;
        let mut app = app_for(endpoint);

        type_text(&mut app, "one");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "two");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.state.conversation.messages().len(), 2);
        assert_eq!(app.state.conversation.input(), "two");

        settle_next(&mut app).await;
        assert_eq!(app.state.conversation.messages().len(), 3);
        assert!(app.outcome_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unreachable_backend_shows_error_and_clears_flag() {
        let mut app = app_for(unreachable_endpoint().await);
        type_text(&mut app, "hello");
        app.handle_key(key(KeyCode::Enter));
        settle_next(&mut app).await;

        let last = app.state.conversation.messages().last().unwrap();
        assert_eq!(last.sender(), Sender::Bot);
        assert_eq!(last.text(), COMMUNICATION_ERROR_TEXT);
        assert!(!app.state.conversation.is_in_flight());
    }

    #[tokio::test]
    async fn blank_enter_sends_nothing() {
        let mut app = app_for(unreachable_endpoint().await);
        type_text(&mut app, "   ");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state.conversation.messages().len(), 1);
        assert!(!app.state.conversation.is_in_flight());
        assert!(app.outcome_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn alt_enter_and_ctrl_j_insert_newlines() {
        let mut app = app_for(unreachable_endpoint().await);
        type_text(&mut app, "a");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
        type_text(&mut app, "b");
        app.handle_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL));
        type_text(&mut app, "c");
        assert_eq!(app.state.conversation.input(), "a\nb\nc");
        assert!(!app.state.conversation.is_in_flight());
    }

    #[tokio::test]
    async fn multi_line_paste_stays_in_buffer() {
        let mut app = app_for(unreachable_endpoint().await);
        type_text(&mut app, ">");
        app.handle_paste("会場は\r\nどこ\rですか");
        assert_eq!(app.state.conversation.input(), ">会場は\nどこ\nですか");
        assert_eq!(app.state.conversation.messages().len(), 1);
        assert!(!app.state.conversation.is_in_flight());
    }

    #[tokio::test]
    async fn editing_keys_move_and_delete() {
        let mut app = app_for(unreachable_endpoint().await);
        type_text(&mut app, "abc");
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Home));
        app.handle_key(key(KeyCode::Delete));
        assert_eq!(app.state.conversation.input(), "c");
    }

    #[tokio::test]
    async fn quit_keys() {
        let mut app = app_for(unreachable_endpoint().await);
        assert!(app.handle_key(key(KeyCode::Esc)));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!app.handle_key(key(KeyCode::Char('c'))));
    }

    #[tokio::test]
    async fn ctrl_t_cycles_theme_without_typing() {
        let mut app = app_for(unreachable_endpoint().await);
        app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(app.state.theme.name, "gruvbox");
        assert_eq!(app.state.conversation.input(), "");
    }

    #[tokio::test]
    async fn scroll_keys_respect_bounds() {
        let mut app = app_for(unreachable_endpoint().await);
        app.state.set_max_scroll_back(12);
        app.handle_key(key(KeyCode::PageUp));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.state.scroll_back, 11);
        app.handle_key(key(KeyCode::PageDown));
        app.handle_key(key(KeyCode::Down));
        assert!(app.state.is_following());
    }

    #[tokio::test]
    async fn reply_returns_view_to_bottom() {
        let (endpoint, _captured) = serve_once(200, r#"{"response":"ok"}"#).await;
        let mut app = app_for(endpoint);
        app.state.set_max_scroll_back(5);
        type_text(&mut app, "q");
        app.handle_key(key(KeyCode::Enter));
        app.state.scroll_up(3);

        let outcome = app.outcome_rx.recv().await.unwrap();
        app.outcome_tx.send(outcome).unwrap();
        app.drain_outcomes();

        assert!(app.state.is_following());
        assert!(!app.state.conversation.is_in_flight());
    }

    // ── One-shot mode ─────────────────────────────────────────────

    #[tokio::test]
    async fn run_once_returns_reply() {
        let (endpoint, _captured) = serve_once(200, r#"{"response":"第一体育館です"}"#).await;
        let config = Config {
            endpoint,
            ..Config::default()
        };
        assert_eq!(run_once(&config, " 会場は？ ").await.unwrap(), "第一体育館です");
    }

    #[tokio::test]
    async fn run_once_bad_status_returns_error_text() {
        let (endpoint, _captured) = serve_once(503, "").await;
        let config = Config {
            endpoint,
            ..Config::default()
        };
        assert_eq!(
            run_once(&config, "q").await.unwrap(),
            COMMUNICATION_ERROR_TEXT
        );
    }

    #[tokio::test]
    async fn run_once_blank_is_err() {
        let config = Config {
            endpoint: unreachable_endpoint().await,
            ..Config::default()
        };
        assert!(run_once(&config, " \n ").await.is_err());
    }
}
