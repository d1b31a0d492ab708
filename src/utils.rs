//! Shared utility functions used across modules.

use unicode_width::UnicodeWidthStr;

use crate::constants::{ANIMATION_TICKS, SPINNER_CHARS};

/// Get the spinner character for the current tick.
pub fn spinner_char(tick: u64) -> &'static str {
    let frame = tick / ANIMATION_TICKS;
    SPINNER_CHARS[(frame % SPINNER_CHARS.len() as u64) as usize]
}

/// Byte offset where the shortest suffix of `s` narrower than `max_width`
/// display columns begins.
///
/// Used to scroll a long input line horizontally so the cursor, which sits
/// right after `s`, stays visible. Double-width characters count as two.
pub fn tail_start(s: &str, max_width: usize) -> usize {
    if max_width == 0 {
        return s.len();
    }
    let mut start = 0;
    while s[start..].width() >= max_width {
        match s[start..].chars().next() {
            Some(c) => start += c.len_utf8(),
            None => break,
        }
    }
    start
}
