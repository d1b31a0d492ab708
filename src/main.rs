//! # taikai-chat - Terminal client for the tournament chatbot
//!
//! Keeps a conversation with the chatbot backend: every submitted message is
//! POSTed as JSON, and the reply (or a fixed error message) is appended to
//! the history shown in a full-screen terminal view.

mod app;
mod chat;
mod config;
pub mod constants;
mod ui;
mod utils;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use config::Config;

/// taikai-chat - Tournament chatbot in your terminal
#[derive(Parser, Debug)]
#[command(name = "taikai-chat", version, about = "Terminal chat client for the tournament chatbot")]
struct Cli {
    /// Chatbot endpoint receiving the POST (default http://localhost:5001/chat)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Value sent as `user_id` with every message
    #[arg(long, value_name = "ID")]
    user_id: Option<String>,

    /// Request timeout in seconds (0 = none)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Color theme (default, gruvbox, nord, dracula, or a custom theme file name)
    #[arg(long, short = 't')]
    theme: Option<String>,

    /// Send one message, print the reply and exit
    #[arg(long, short = 'm', value_name = "TEXT")]
    message: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log file for the interactive view (default ~/.local/share/taikai-chat/taikai-chat.log)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // One-shot mode keeps stderr; the TUI owns the terminal so logs go to a file
    if cli.message.is_some() {
        init_logging(cli.verbose, None)?;
    } else {
        let log_path = cli
            .log_file
            .clone()
            .unwrap_or_else(constants::default_log_path);
        init_logging(cli.verbose, Some(&log_path))?;
    }

    // Load and apply CLI overrides to config
    let mut config = Config::load();
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(user_id) = cli.user_id {
        config.user_id = user_id;
    }
    if let Some(secs) = cli.timeout {
        config.request_timeout_secs = secs;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    tracing::debug!(?config, "effective configuration");

    if let Some(message) = cli.message {
        let reply = app::run_once(&config, &message).await?;
        println!("{}", reply);
        return Ok(());
    }

    let mut app = app::App::new(&config)?;
    app.run().await
}

fn init_logging(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            }
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    }
    Ok(())
}
