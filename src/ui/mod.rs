mod renderer;
mod state;
pub mod theme;

pub use renderer::{max_scroll_back, render};
pub use state::AppState;
pub use theme::Theme;
