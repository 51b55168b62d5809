//! Abbreviation resolution
//!
//! Decides per word whether to pronounce an acronym, spell an initialism or
//! leave the word alone. Dictionary lookups come first, then spans flagged
//! by the abbreviation tagger, then an all-caps heuristic.

use super::spell_out;
use crate::lexicon::maps::is_curated_initialism;
use crate::lexicon::LexiconStore;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref WORD_REGEX: Regex = Regex::new(r"\S+").unwrap();
}

const POSSESSIVES: &[&str] = &["'s", "\u{2019}s"];

/// A span the abbreviation tagger believes is an abbreviation.
/// Offsets are byte offsets into the text that was tagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbbreviationSpan {
    #[serde(rename = "word")]
    pub text: String,
    #[serde(rename = "startOffset")]
    pub start: usize,
    #[serde(rename = "endOffset")]
    pub end: usize,
    #[serde(rename = "confidenceScore")]
    pub score: f32,
}

impl AbbreviationSpan {
    pub fn new(text: &str, start: usize, end: usize, score: f32) -> Self {
        Self {
            text: text.to_string(),
            start,
            end,
            score,
        }
    }

    /// Whether this span overlaps the byte range `start..end`
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }
}

/// Merge spans whose offsets touch or overlap. The merged span keeps the
/// lowest confidence of its parts.
pub fn merge_spans(spans: &[AbbreviationSpan]) -> Vec<AbbreviationSpan> {
    let mut sorted = spans.to_vec();
    sorted.sort_by_key(|s| (s.start, s.end));

    let mut merged: Vec<AbbreviationSpan> = Vec::with_capacity(sorted.len());
    for span in sorted {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => {
                if span.end > last.end {
                    let extra = span.end - last.end;
                    let tail = span
                        .text
                        .get(span.text.len().saturating_sub(extra)..)
                        .unwrap_or(&span.text);
                    last.text.push_str(tail);
                    last.end = span.end;
                }
                last.score = last.score.min(span.score);
            }
            _ => merged.push(span),
        }
    }

    merged
}

/// Drop spans at or below `threshold`, then merge what is left
pub fn actionable_spans(spans: &[AbbreviationSpan], threshold: f32) -> Vec<AbbreviationSpan> {
    let confident: Vec<AbbreviationSpan> = spans
        .iter()
        .filter(|s| s.score > threshold)
        .cloned()
        .collect();
    merge_spans(&confident)
}

/// Outcome for one word; exactly one applies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Replace with this pronunciation
    Acronym(String),
    /// Spell letter by letter
    Initialism,
    /// Leave the word as written
    PassThrough,
}

/// Resolves abbreviations against a lexicon
#[derive(Debug, Clone, Copy)]
pub struct AbbreviationResolver<'a> {
    lexicon: &'a LexiconStore,
}

impl<'a> AbbreviationResolver<'a> {
    pub fn new(lexicon: &'a LexiconStore) -> Self {
        Self { lexicon }
    }

    /// Resolve every word of `text`. `spans` must already be filtered and
    /// merged (see [`actionable_spans`]).
    pub fn resolve(&self, text: &str, spans: &[AbbreviationSpan]) -> String {
        WORD_REGEX
            .replace_all(text, |caps: &Captures| {
                let Some(m) = caps.get(0) else {
                    return String::new();
                };
                let tagged = spans.iter().any(|s| s.overlaps(m.start(), m.end()));
                self.resolve_word(m.as_str(), tagged)
            })
            .into_owned()
    }

    /// Resolve one whitespace-delimited word
    pub fn resolve_word(&self, word: &str, tagged: bool) -> String {
        let (leading, core, trailing) = split_punctuation(word);
        if core.is_empty() {
            return word.to_string();
        }

        // A plain word such as "THIS" or "NEWS" is not a plural abbreviation
        let (base, suffix) = if self.lexicon.is_common_word(core) {
            (core, "")
        } else {
            split_suffix(core)
        };
        let replacement = match self.classify(base, tagged) {
            Resolution::Acronym(pronunciation) => pronunciation,
            Resolution::Initialism => spell_out(base),
            Resolution::PassThrough => return word.to_string(),
        };

        format!("{}{}{}{}", leading, replacement, suffix, trailing)
    }

    /// Decide the outcome for a word already stripped of punctuation and
    /// possessive/plural suffixes
    pub fn classify(&self, base: &str, tagged: bool) -> Resolution {
        if let Some(pronunciation) = self.lexicon.acronym(base) {
            return Resolution::Acronym(pronunciation.to_string());
        }
        if self.lexicon.is_initialism(base) || is_curated_initialism(base) {
            return Resolution::Initialism;
        }
        if tagged && !self.lexicon.is_common_word(base) {
            return Resolution::Initialism;
        }
        if is_all_caps(base) && !self.lexicon.is_common_word(base) {
            return Resolution::Initialism;
        }
        Resolution::PassThrough
    }
}

/// At least one letter, and every letter uppercase
pub fn is_all_caps(word: &str) -> bool {
    let mut letters = word.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_uppercase())
}

/// Split leading and trailing non-alphanumeric characters off a word
fn split_punctuation(word: &str) -> (&str, &str, &str) {
    let start = word
        .char_indices()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, _)| i)
        .unwrap_or(word.len());
    let end = word
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(start);
    if end <= start {
        return (word, "", "");
    }
    (&word[..start], &word[start..end], &word[end..])
}

/// Split a possessive `'s`, or a plural `s` after an all-caps stem
fn split_suffix(core: &str) -> (&str, &str) {
    for possessive in POSSESSIVES {
        if let Some(base) = core.strip_suffix(possessive) {
            if !base.is_empty() {
                return (base, &core[base.len()..]);
            }
        }
    }

    if let Some(base) = core.strip_suffix('s') {
        if base.chars().count() >= 2 && is_all_caps(base) {
            return (base, "s");
        }
    }

    (core, "")
}
