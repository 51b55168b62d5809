//! Alphanumeric segmentation
//!
//! Splits tokens such as `CY23` into `CY 23` so letters and digits reach
//! the abbreviation and number stages separately.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref TOKEN_REGEX: Regex = Regex::new(r"\S+").unwrap();
    /// Ordinals keep their suffix attached for the ordinal rule
    static ref ORDINAL_TOKEN: Regex =
        Regex::new(r"^[^\w]*[0-9]+(?:st|nd|rd|th)[^\w]*$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Letter,
    Digit,
    Other,
}

impl CharClass {
    fn of(ch: char) -> Self {
        if ch.is_ascii_digit() {
            CharClass::Digit
        } else if ch.is_alphabetic() {
            CharClass::Letter
        } else {
            CharClass::Other
        }
    }
}

/// Whether a token mixes letters and digits
pub fn is_alphanumeric_mix(token: &str) -> bool {
    token.chars().any(|c| c.is_alphabetic()) && token.chars().any(|c| c.is_ascii_digit())
}

/// Split one token into maximal letter/digit runs joined by single spaces.
/// Punctuation stays with the run it follows.
pub fn segment_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len() + 4);
    let mut current: Option<CharClass> = None;

    for ch in token.chars() {
        let class = CharClass::of(ch);
        if class != CharClass::Other {
            if let Some(prev) = current {
                if prev != class {
                    out.push(' ');
                }
            }
            current = Some(class);
        }
        out.push(ch);
    }

    out
}

/// Segment every mixed letter/digit token in `text`
pub fn segment_alphanumeric(text: &str) -> String {
    TOKEN_REGEX
        .replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            if is_alphanumeric_mix(token) && !ORDINAL_TOKEN.is_match(token) {
                segment_token(token)
            } else {
                token.to_string()
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_token() {
        assert_eq!(segment_token("CY23"), "CY 23");
        assert_eq!(segment_token("A1B2"), "A 1 B 2");
        assert_eq!(segment_token("mp3"), "mp 3");
        assert_eq!(segment_token("2x4"), "2 x 4");
    }

    #[test]
    fn test_punctuation_follows_run() {
        assert_eq!(segment_token("CY23,"), "CY 23,");
        assert_eq!(segment_token("v1.2"), "v 1.2");
    }

    #[test]
    fn test_segment_text() {
        assert_eq!(
            segment_alphanumeric("Flight BA249 leaves at gate B12"),
            "Flight BA 249 leaves at gate B 12"
        );
    }

    #[test]
    fn test_pure_tokens_untouched() {
        assert_eq!(segment_alphanumeric("hello 123 $5.50"), "hello 123 $5.50");
    }

    #[test]
    fn test_ordinals_untouched() {
        assert_eq!(segment_alphanumeric("the 21st century"), "the 21st century");
        assert_eq!(segment_alphanumeric("(3rd)"), "(3rd)");
    }

    #[test]
    fn test_whitespace_preserved() {
        assert_eq!(segment_alphanumeric("a1\tb2"), "a 1\tb 2");
    }
}
