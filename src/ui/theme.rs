use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::chat::Sender;

/// All available built-in theme names, in cycling order.
pub const BUILTIN_THEME_NAMES: &[&str] = &["default", "gruvbox", "nord", "dracula"];

/// Every color the chat view uses, in one struct.
/// Constructed from built-in presets or loaded from TOML files.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ── Brand / Primary ──────────────────────────────────────
    pub accent: Color,
    pub bg_dark: Color,

    // ── Text ─────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_dim: Color,
    pub text_muted: Color,

    // ── Semantic ─────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,

    // ── Borders ──────────────────────────────────────────────
    pub border: Color,

    // ── Message rows ─────────────────────────────────────────
    pub user_accent: Color,
    pub bot_accent: Color,
    pub bot_text: Color,
}

impl Theme {
    pub fn default_dark() -> Self {
        Self {
            name: "default".to_string(),
            accent: Color::Rgb(99, 179, 237),
            bg_dark: Color::Rgb(22, 22, 30),
            text_primary: Color::Rgb(220, 220, 235),
            text_dim: Color::Rgb(120, 120, 145),
            text_muted: Color::Rgb(80, 80, 100),
            success: Color::Rgb(72, 199, 142),
            warning: Color::Rgb(255, 193, 69),
            border: Color::Rgb(55, 55, 75),
            user_accent: Color::Rgb(99, 179, 237),
            bot_accent: Color::Rgb(217, 143, 255),
            bot_text: Color::Rgb(200, 210, 230),
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            accent: Color::Rgb(215, 153, 33),        // yellow
            bg_dark: Color::Rgb(40, 40, 40),         // bg0
            text_primary: Color::Rgb(235, 219, 178), // fg
            text_dim: Color::Rgb(168, 153, 132),     // fg4
            text_muted: Color::Rgb(102, 92, 84),     // bg4
            success: Color::Rgb(142, 192, 124),      // green
            warning: Color::Rgb(250, 189, 47),
            border: Color::Rgb(80, 73, 69),
            user_accent: Color::Rgb(131, 165, 152),  // blue
            bot_accent: Color::Rgb(211, 134, 155),   // purple
            bot_text: Color::Rgb(235, 219, 178),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            accent: Color::Rgb(136, 192, 208),       // nord8
            bg_dark: Color::Rgb(46, 52, 64),         // nord0
            text_primary: Color::Rgb(229, 233, 240), // nord5
            text_dim: Color::Rgb(182, 191, 204),
            text_muted: Color::Rgb(107, 112, 127),
            success: Color::Rgb(163, 190, 140),      // nord14
            warning: Color::Rgb(235, 203, 139),      // nord13
            border: Color::Rgb(76, 86, 106),         // nord3
            user_accent: Color::Rgb(129, 161, 193),  // nord9
            bot_accent: Color::Rgb(180, 142, 173),   // nord15
            bot_text: Color::Rgb(216, 222, 233),     // nord4
        }
    }

    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            accent: Color::Rgb(139, 233, 253),       // cyan
            bg_dark: Color::Rgb(40, 42, 54),
            text_primary: Color::Rgb(248, 248, 242),
            text_dim: Color::Rgb(188, 188, 172),
            text_muted: Color::Rgb(98, 114, 164),    // comment
            success: Color::Rgb(80, 250, 123),
            warning: Color::Rgb(241, 250, 140),
            border: Color::Rgb(98, 114, 164),
            user_accent: Color::Rgb(139, 233, 253),
            bot_accent: Color::Rgb(189, 147, 249),   // purple
            bot_text: Color::Rgb(248, 248, 242),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_dark()),
            "gruvbox" => Some(Self::gruvbox()),
            "nord" => Some(Self::nord()),
            "dracula" => Some(Self::dracula()),
            _ => None,
        }
    }

    /// Built-in theme by name, else ~/.config/taikai-chat/themes/<name>.toml,
    /// else the default.
    pub fn resolve(name: &str) -> Self {
        Self::by_name(name)
            .or_else(|| Self::from_toml_file(&crate::constants::custom_theme_path(name)))
            .unwrap_or_else(|| {
                tracing::warn!(theme = name, "unknown theme, using default");
                Self::default()
            })
    }

    /// Cycle to the next built-in theme. Custom themes cycle to the first.
    pub fn next_builtin(&self) -> Self {
        let next_idx = BUILTIN_THEME_NAMES
            .iter()
            .position(|&n| n == self.name)
            .map(|idx| (idx + 1) % BUILTIN_THEME_NAMES.len())
            .unwrap_or(0);
        Self::by_name(BUILTIN_THEME_NAMES[next_idx]).unwrap_or_default()
    }

    /// Load a custom theme from a TOML file, falling back to default for missing fields.
    pub fn from_toml_file(path: &std::path::Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let file: ThemeFile = toml::from_str(&content).ok()?;
        Some(
            file.into_theme(
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("custom"),
            ),
        )
    }

    // ── Computed Styles ──────────────────────────────────────

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_highlight_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn badge_style(&self, color: Color) -> Style {
        Style::default()
            .fg(self.bg_dark)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    }

    /// Badge color for a message row.
    pub fn sender_accent(&self, sender: Sender) -> Color {
        match sender {
            Sender::User => self.user_accent,
            Sender::Bot => self.bot_accent,
        }
    }

    /// Body text style for a message row.
    pub fn sender_text_style(&self, sender: Sender) -> Style {
        match sender {
            Sender::User => Style::default().fg(self.text_primary),
            Sender::Bot => Style::default().fg(self.bot_text),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}

// ── TOML deserialization for custom themes ──────────────────

/// Intermediate struct for parsing theme TOML files.
/// All fields are optional — missing fields inherit from the default theme.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeFile {
    accent: Option<String>,
    bg_dark: Option<String>,
    text_primary: Option<String>,
    text_dim: Option<String>,
    text_muted: Option<String>,
    success: Option<String>,
    warning: Option<String>,
    border: Option<String>,
    user_accent: Option<String>,
    bot_accent: Option<String>,
    bot_text: Option<String>,
}

impl ThemeFile {
    fn into_theme(self, name: &str) -> Theme {
        let base = Theme::default_dark();
        let pick = |v: Option<String>, fallback: Color| parse_color(v.as_deref()).unwrap_or(fallback);
        Theme {
            name: name.to_string(),
            accent: pick(self.accent, base.accent),
            bg_dark: pick(self.bg_dark, base.bg_dark),
            text_primary: pick(self.text_primary, base.text_primary),
            text_dim: pick(self.text_dim, base.text_dim),
            text_muted: pick(self.text_muted, base.text_muted),
            success: pick(self.success, base.success),
            warning: pick(self.warning, base.warning),
            border: pick(self.border, base.border),
            user_accent: pick(self.user_accent, base.user_accent),
            bot_accent: pick(self.bot_accent, base.bot_accent),
            bot_text: pick(self.bot_text, base.bot_text),
        }
    }
}

/// Parse a hex color string like "#FF8800" or "FF8800" into a ratatui Color.
fn parse_color(s: Option<&str>) -> Option<Color> {
    let hex = s?.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
