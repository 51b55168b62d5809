//! Small string cleaners used around the main rule stages

use crate::lexicon::maps::{PRONOUN_OVERRIDES, SENTENCE_ABBREVIATIONS};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;
use deunicode::deunicode_char;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
    static ref IN_WORD_COLON: Regex = Regex::new(r"(\w):(\w)").unwrap();
    static ref IN_WORD_DOT: Regex = Regex::new(r"\b\.\b").unwrap();

    static ref PRONOUN_REGEX: Regex = {
        let mut keys: Vec<&str> = PRONOUN_OVERRIDES.keys().copied().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        let alternation = keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"\b(?:{})\b", alternation)).unwrap()
    };

    static ref SENTENCE_ABBREVIATION_RULES: Vec<(Regex, &'static str)> = SENTENCE_ABBREVIATIONS
        .iter()
        .map(|(abbr, spoken)| {
            let pattern = format!(r"(?i)\b{}\.", regex::escape(abbr));
            (Regex::new(&pattern).unwrap(), *spoken)
        })
        .collect();

    /// Typographic punctuation with a direct ASCII equivalent
    static ref PUNCT_MAP: HashMap<char, &'static str> = {
        let mut m = HashMap::new();
        m.insert('\u{FF0C}', ",");
        m.insert('\u{3002}', ".");
        m.insert('\u{FF01}', "!");
        m.insert('\u{FF1F}', "?");
        m.insert('\u{FF1B}', ";");
        m.insert('\u{FF1A}', ":");
        m.insert('\u{201C}', "\"");
        m.insert('\u{201D}', "\"");
        m.insert('\u{00AB}', "\"");
        m.insert('\u{00BB}', "\"");
        m.insert('\u{2018}', "'");
        m.insert('\u{2019}', "'");
        m.insert('\u{2013}', "-");
        m.insert('\u{2014}', " - ");
        m.insert('\u{2026}', ".");
        m.insert('\u{00A0}', " ");
        m.insert('\u{00DF}', "ss");
        m.insert('\u{00E6}', "ae");
        m.insert('\u{00C6}', "AE");
        m.insert('\u{0153}', "oe");
        m.insert('\u{0152}', "OE");
        m.insert('\u{00F8}', "o");
        m.insert('\u{00D8}', "O");
        m.insert('\u{0142}', "l");
        m.insert('\u{0141}', "L");
        m
    };
}

/// Collapse runs of whitespace to one space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Literal `...` becomes a single period
pub fn collapse_ellipsis(text: &str) -> String {
    text.replace("...", ".")
}

/// Transliterate to ASCII: map typographic punctuation, strip accents via
/// NFKD decomposition, then romanize what is left (`Москва` becomes `Moskva`)
pub fn convert_to_ascii(text: &str) -> String {
    let mapped: String = text
        .chars()
        .map(|c| match PUNCT_MAP.get(&c) {
            Some(s) => s.to_string(),
            None => c.to_string(),
        })
        .collect();

    let mut ascii = String::with_capacity(mapped.len());
    for c in mapped.nfkd() {
        if c.is_ascii() {
            ascii.push(c);
        } else if !is_combining_mark(c) {
            ascii.push_str(deunicode_char(c).unwrap_or(""));
        }
    }
    ascii
}

/// Replace shouted pronouns so they are not read as abbreviations
pub fn apply_pronoun_overrides(text: &str) -> String {
    PRONOUN_REGEX
        .replace_all(text, |caps: &Captures| {
            PRONOUN_OVERRIDES
                .get(&caps[0])
                .map(|s| s.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Remove double quotes
pub fn remove_quotes(text: &str) -> String {
    text.replace('"', "")
}

/// Expand dotted abbreviations such as `Mr.` and `e.g.`
pub fn expand_sentence_abbreviations(text: &str) -> String {
    SENTENCE_ABBREVIATION_RULES
        .iter()
        .fold(text.to_string(), |acc, (regex, spoken)| {
            regex.replace_all(&acc, *spoken).into_owned()
        })
}

/// `ten:thirty` becomes `ten colon thirty`
pub fn expand_colons(text: &str) -> String {
    IN_WORD_COLON.replace_all(text, "$1 colon $2").into_owned()
}

/// `node.js` becomes `node point js`
pub fn expand_in_word_dots(text: &str) -> String {
    IN_WORD_DOT.replace_all(text, " point ").into_owned()
}

pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}
