//! Text rule stages
//!
//! Each stage is a plain `&str -> String` function (some also take the
//! lexicon) so it can be tested on its own. The pipeline module decides
//! the order.

pub mod abbreviation;
pub mod cleaners;
pub mod numbers;
pub mod segment;
pub mod symbols;
mod tokenizer;
pub mod url;

pub use abbreviation::{
    actionable_spans, merge_spans, AbbreviationResolver, AbbreviationSpan, Resolution,
};
pub use numbers::{cardinal_words, normalize_numbers, number_words, ordinal_words};
pub use segment::segment_alphanumeric;
pub use symbols::strip_symbols;
pub use tokenizer::{Encoding, Tokenizer, TokenizerConfig, VoiceTokenizer};
pub use url::pronounce_urls;

/// Spell a word letter by letter, keeping only letters and digits:
/// `"U.S"` becomes `"U S"`
pub fn spell_out(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric())
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Edit distance between two strings, counted in characters
pub fn lev_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}
