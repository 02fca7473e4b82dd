//! Character-level Unicode helpers for kana text.

/// Hiragana letters that have a katakana counterpart at +0x60 (ぁ..ゖ).
const HIRAGANA_LETTERS: std::ops::RangeInclusive<char> = '\u{3041}'..='\u{3096}';

/// Katakana letters that have a hiragana counterpart at -0x60 (ァ..ヶ).
const KATAKANA_LETTERS: std::ops::RangeInclusive<char> = '\u{30A1}'..='\u{30F6}';

/// Check the full Hiragana block (U+3040..U+309F).
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Fold a katakana letter to hiragana. Everything else (ー, ヷ, ASCII, ...)
/// is returned unchanged.
pub fn katakana_to_hiragana_char(c: char) -> char {
    if KATAKANA_LETTERS.contains(&c) {
        char::from_u32(c as u32 - 0x60).unwrap_or(c)
    } else {
        c
    }
}

/// Convert a hiragana string to katakana.
/// Non-letter characters (ー, marks, ASCII, etc.) are passed through unchanged.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if HIRAGANA_LETTERS.contains(&c) {
                char::from_u32(c as u32 + 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Convert a katakana string to hiragana.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars().map(katakana_to_hiragana_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hiragana_to_katakana() {
        assert_eq!(hiragana_to_katakana("きょうは"), "キョウハ");
        assert_eq!(hiragana_to_katakana("らーめん"), "ラーメン");
        assert_eq!(hiragana_to_katakana("ゔぁ"), "ヴァ");
        assert_eq!(hiragana_to_katakana(""), "");
        assert_eq!(hiragana_to_katakana("abc"), "abc");
        assert_eq!(hiragana_to_katakana("カタカナ"), "カタカナ");
    }

    #[test]
    fn test_katakana_to_hiragana() {
        assert_eq!(katakana_to_hiragana("サンキュー"), "さんきゅー");
        assert_eq!(katakana_to_hiragana("ヴ"), "ゔ");
        assert_eq!(katakana_to_hiragana("ヵヶ"), "ゕゖ");
        assert_eq!(katakana_to_hiragana("ひらがな"), "ひらがな");
        assert_eq!(katakana_to_hiragana("漢字"), "漢字");
    }

    #[test]
    fn test_char_classification() {
        assert!(is_hiragana('あ'));
        assert!(!is_hiragana('ア'));
        assert_eq!(katakana_to_hiragana_char('ー'), 'ー');
    }
}
