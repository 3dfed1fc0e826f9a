//! Export file naming.

use std::sync::LazyLock;

use regex::Regex;

/// Fixed file name for horoscope spreads.
pub const HOROSCOPE_FILENAME: &str = "horoscope_export.xml";

/// Stem used when a puzzle has no usable theme.
const FALLBACK_STEM: &str = "crossword";

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]").expect("valid regex"));

/// Derive the file stem from a puzzle theme.
///
/// The theme is lowercased and every character outside `[a-z0-9]` becomes
/// `_` (no collapsing). A blank theme yields `crossword`.
///
/// ```
/// use portal_core::export::crossword_stem;
///
/// assert_eq!(crossword_stem("Sci-Fi & Fantasy!"), "sci_fi___fantasy_");
/// assert_eq!(crossword_stem("   "), "crossword");
/// ```
pub fn crossword_stem(theme: &str) -> String {
    if theme.trim().is_empty() {
        return FALLBACK_STEM.to_string();
    }
    UNSAFE_CHARS
        .replace_all(&theme.to_lowercase(), "_")
        .into_owned()
}

/// Full export file name for a puzzle theme: `crossword_{stem}.xml`.
pub fn crossword_filename(theme: &str) -> String {
    format!("crossword_{}.xml", crossword_stem(theme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_becomes_underscores() {
        assert_eq!(crossword_stem("Sci-Fi & Fantasy!"), "sci_fi___fantasy_");
    }

    #[test]
    fn blank_theme_falls_back() {
        assert_eq!(crossword_stem(""), "crossword");
        assert_eq!(crossword_stem(" \t "), "crossword");
    }

    #[test]
    fn digits_survive() {
        assert_eq!(crossword_stem("80s Music"), "80s_music");
    }

    #[test]
    fn non_ascii_is_replaced() {
        assert_eq!(crossword_stem("Café"), "caf_");
    }

    #[test]
    fn filename_wraps_stem() {
        assert_eq!(crossword_filename("Travel"), "crossword_travel.xml");
        assert_eq!(crossword_filename(""), "crossword_crossword.xml");
    }
}
