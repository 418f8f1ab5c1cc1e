// Emoji removal.
//
// Works on extended grapheme clusters so multi-codepoint emoji (ZWJ family
// sequences, skin tones, flags, keycaps) disappear as a unit instead of
// leaving stray joiners or variation selectors behind.

use unicode_segmentation::UnicodeSegmentation;

/// Remove every emoji grapheme from `text`. Everything else is kept as-is.
pub fn strip_emoji(text: &str) -> String {
    text.graphemes(true)
        .filter(|grapheme| !is_emoji_grapheme(grapheme))
        .collect()
}

fn is_emoji_grapheme(grapheme: &str) -> bool {
    grapheme
        .chars()
        .any(|c| is_pictographic(c) || c == '\u{20E3}' || is_tag(c))
}

/// Codepoints that render as emoji (Extended_Pictographic plus regional
/// indicators and skin-tone modifiers, which live inside the 1F000 block).
fn is_pictographic(c: char) -> bool {
    matches!(
        c as u32,
        0x00A9
            | 0x00AE
            | 0x203C
            | 0x2049
            | 0x2122
            | 0x2139
            | 0x2194..=0x2199
            | 0x21A9..=0x21AA
            | 0x231A..=0x231B
            | 0x2328
            | 0x23CF
            | 0x23E9..=0x23F3
            | 0x23F8..=0x23FA
            | 0x24C2
            | 0x25AA..=0x25AB
            | 0x25B6
            | 0x25C0
            | 0x25FB..=0x25FE
            | 0x2600..=0x27BF
            | 0x2934..=0x2935
            | 0x2B05..=0x2B07
            | 0x2B1B..=0x2B1C
            | 0x2B50
            | 0x2B55
            | 0x3030
            | 0x303D
            | 0x3297
            | 0x3299
            | 0x1F000..=0x1FAFF
    )
}

/// Tag characters used by subdivision flags (England, Scotland, Wales).
fn is_tag(c: char) -> bool {
    matches!(c as u32, 0xE0020..=0xE007F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_simple_emoji() {
        assert_eq!(strip_emoji("you suck 😂"), "you suck ");
        assert_eq!(strip_emoji("🔥fire🔥"), "fire");
    }

    #[test]
    fn test_strips_zwj_sequence_whole() {
        // family: man, ZWJ, woman, ZWJ, girl
        let text = "hi \u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467} there";
        assert_eq!(strip_emoji(text), "hi  there");
    }

    #[test]
    fn test_strips_modifiers_and_selectors() {
        // thumbs up + skin tone, heart + variation selector
        assert_eq!(strip_emoji("ok \u{1F44D}\u{1F3FD}"), "ok ");
        assert_eq!(strip_emoji("love \u{2764}\u{FE0F}"), "love ");
    }

    #[test]
    fn test_strips_flags_and_keycaps() {
        assert_eq!(strip_emoji("go \u{1F1FA}\u{1F1F8}!"), "go !");
        assert_eq!(strip_emoji("number 1\u{FE0F}\u{20E3}"), "number ");
    }

    #[test]
    fn test_keeps_plain_and_accented_text() {
        assert_eq!(strip_emoji("café naïve"), "café naïve");
        assert_eq!(strip_emoji("100% sure!!!"), "100% sure!!!");
        assert_eq!(strip_emoji(""), "");
    }
}
