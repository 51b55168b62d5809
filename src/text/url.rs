//! URL pronunciation
//!
//! `http://abc.com/a?x=1` is read as
//! `h t t p slash abc dot com slash a slash x equal 1`.

use super::spell_out;
use crate::lexicon::LexiconStore;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Scheme prefixes that mark a token as a URL
pub const URL_SCHEMES: &[&str] = &["http://", "https://", "ftp://", "ftps://"];

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', '"', '\''];

lazy_static! {
    static ref TOKEN_REGEX: Regex = Regex::new(r"\S+").unwrap();
}

/// Whether a whitespace token starts with a recognized scheme
pub fn is_url(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    URL_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

/// Rewrite every URL token in `text` into its spoken form
pub fn pronounce_urls(text: &str, lexicon: &LexiconStore) -> String {
    TOKEN_REGEX
        .replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            if is_url(token) {
                pronounce_url(token, lexicon)
            } else {
                token.to_string()
            }
        })
        .into_owned()
}

/// Spoken form of a single URL token. Sentence punctuation after the URL
/// is kept after the spoken form.
pub fn pronounce_url(token: &str, lexicon: &LexiconStore) -> String {
    let body = token.trim_end_matches(TRAILING_PUNCTUATION);
    let trailing = &token[body.len()..];

    let Some((scheme, rest)) = body.split_once("://") else {
        return token.to_string();
    };

    // Fragments are not read aloud
    let rest = rest.split('#').next().unwrap_or("");
    let (location, query) = match rest.split_once('?') {
        Some((location, query)) => (location, Some(query)),
        None => (rest, None),
    };

    let mut segments = location.split('/');
    let host = segments.next().unwrap_or("");
    let path: Vec<String> = segments
        .filter(|s| !s.is_empty())
        .map(speak_dotted)
        .collect();

    let mut parts = vec![spell_out(scheme), speak_host(host), path.join(" slash ")];
    if let Some(query) = query {
        parts.push(speak_query(query, lexicon));
    }

    let spoken = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" slash ");

    format!("{}{}", spoken, trailing)
}

fn speak_host(host: &str) -> String {
    match host.split_once(':') {
        Some((name, port)) if !port.is_empty() => {
            format!("{} colon {}", speak_dotted(name), port)
        }
        Some((name, _)) => speak_dotted(name),
        None => speak_dotted(host),
    }
}

fn speak_dotted(segment: &str) -> String {
    segment
        .split('.')
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(" dot ")
}

/// `key=value` pairs joined by "ampersand"; uncommon words are spelled
fn speak_query(query: &str, lexicon: &LexiconStore) -> String {
    let speak_word = |word: &str| {
        if lexicon.is_common_word(word) {
            word.to_string()
        } else {
            spell_out(word)
        }
    };

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !value.is_empty() => {
                format!("{} equal {}", speak_word(key), speak_word(value))
            }
            Some((key, _)) => speak_word(key),
            None => speak_word(pair),
        })
        .collect::<Vec<_>>()
        .join(" ampersand ")
}
