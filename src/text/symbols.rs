//! Symbol and noise stripping
//!
//! Math symbols are spoken; emoji and emoticons are deleted.

use crate::lexicon::maps::MATH_SYMBOLS;
use crate::lexicon::LexiconStore;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref EMOJI_REGEX: Regex = Regex::new(concat!(
        "[",
        r"\x{1F600}-\x{1F64F}", // emoticons
        r"\x{1F300}-\x{1F5FF}", // symbols & pictographs
        r"\x{1F680}-\x{1F6FF}", // transport & map symbols
        r"\x{1F1E0}-\x{1F1FF}", // flags
        r"\x{1F900}-\x{1F9FF}", // supplemental symbols & pictographs
        r"\x{2600}-\x{26FF}",   // miscellaneous symbols
        r"\x{2700}-\x{27BF}",   // dingbats
        r"\x{FE0F}\x{200D}",    // variation selector, zero-width joiner
        "]+"
    ))
    .unwrap();

    static ref MATH_REGEX: Regex = {
        let mut symbols: Vec<&str> = MATH_SYMBOLS.keys().copied().collect();
        symbols.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        let alternation = symbols
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&alternation).unwrap()
    };
}

/// Remove emoji, configured emoticons and the literal `//`
pub fn remove_emoji(text: &str, lexicon: &LexiconStore) -> String {
    let text = EMOJI_REGEX.replace_all(text, "");
    lexicon.emoticon_pattern().replace_all(&text, "").into_owned()
}

/// Replace math symbols with their names, padded so words never merge
pub fn replace_math_symbols(text: &str) -> String {
    MATH_REGEX
        .replace_all(text, |caps: &Captures| {
            let spoken = MATH_SYMBOLS.get(&caps[0]).copied().unwrap_or("");
            format!(" {} ", spoken)
        })
        .into_owned()
}

/// Emoji and emoticons go first so their characters are never spoken
pub fn strip_symbols(text: &str, lexicon: &LexiconStore) -> String {
    replace_math_symbols(&remove_emoji(text, lexicon))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> LexiconStore {
        LexiconStore::bundled().unwrap()
    }

    #[test]
    fn test_math_symbols_padded() {
        assert_eq!(replace_math_symbols("2+2=4"), "2 plus 2 equals 4");
        assert_eq!(replace_math_symbols("a≥b"), "a greater than or equal to b");
        assert_eq!(replace_math_symbols("no symbols"), "no symbols");
    }

    #[test]
    fn test_remove_emoji() {
        let lex = lexicon();
        assert_eq!(remove_emoji("great job 👍🎉", &lex), "great job ");
        assert_eq!(remove_emoji("sunny ☀️ day", &lex), "sunny  day");
    }

    #[test]
    fn test_remove_emoticons() {
        let lex = lexicon();
        assert_eq!(remove_emoji("thanks :) see you ;-)", &lex), "thanks  see you ");
        assert_eq!(remove_emoji("a // b", &lex), "a  b");
    }

    #[test]
    fn test_emoticons_removed_before_math() {
        let lex = lexicon();
        // "^_^" must disappear rather than become "to the power of"
        assert_eq!(strip_symbols("yay ^_^", &lex), "yay ");
        assert_eq!(strip_symbols("x^2", &lex), "x to the power of 2");
    }
}
