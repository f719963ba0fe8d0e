//! Theme presentation helpers.
//!
//! Themes are bare labels; these helpers derive the display label and the
//! pill colour the board shows for a theme. Both are pure and stable.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-_]").expect("valid separator regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static WORD_START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w").expect("valid word regex"));

/// Fixed theme colour palette (hex RGB).
pub const THEME_PALETTE: [&str; 10] = [
    "#3b82f6", "#10b981", "#8b5cf6", "#f59e0b", "#ef4444", "#06b6d4", "#a3e635", "#f472b6",
    "#22d3ee", "#f97316",
];

/// Derives a display label: `ai-input` -> `Ai Input`.
pub fn theme_label(name: &str) -> String {
    let spaced = SEPARATOR_RE.replace_all(name, " ");
    let collapsed = WHITESPACE_RE.replace_all(&spaced, " ");
    WORD_START_RE
        .replace_all(collapsed.trim(), |caps: &Captures<'_>| caps[0].to_uppercase())
        .into_owned()
}

/// Picks a stable palette colour for a theme.
///
/// Hashes UTF-16 code units with a wrapping 31-multiplier so labels map to
/// the same colour the web board shows.
pub fn theme_color(name: &str) -> &'static str {
    let hash = name
        .encode_utf16()
        .fold(0u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(u32::from(unit)));
    THEME_PALETTE[(hash as usize) % THEME_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::{theme_color, theme_label, THEME_PALETTE};

    #[test]
    fn label_replaces_separators_and_capitalizes_words() {
        assert_eq!(theme_label("ai-input"), "Ai Input");
        assert_eq!(theme_label("  user__research  "), "User Research");
        assert_eq!(theme_label("layout"), "Layout");
    }

    #[test]
    fn color_is_stable_and_from_palette() {
        let first = theme_color("onboarding");
        assert_eq!(first, theme_color("onboarding"));
        assert!(THEME_PALETTE.contains(&first));
        // "a" hashes to 97.
        assert_eq!(theme_color("a"), THEME_PALETTE[7]);
    }
}
