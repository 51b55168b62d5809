//! Lexicon store
//!
//! Holds the acronym table, the initialism set, the common-word set and the
//! emoticon pattern. Everything is loaded once at startup and is read-only
//! afterwards, so one store can be shared across threads behind an `Arc`.

mod loader;
pub mod maps;

pub use loader::{parse_abbreviation_table, parse_emoticons, parse_word_list};

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

const BUNDLED_ACRONYMS: &str = include_str!("../../data/acronyms.csv");
const BUNDLED_COMMON_WORDS: &str = include_str!("../../data/common_words.txt");
const BUNDLED_EMOTICONS: &str = include_str!("../../data/emoticons.json");

/// How an abbreviation is spoken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbbreviationKind {
    /// Pronounced as a word
    Acronym,
    /// Spelled letter by letter
    Initialism,
}

/// One row of an abbreviation table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbreviationEntry {
    pub abbreviation: String,
    pub kind: AbbreviationKind,
    /// Spoken form; never empty after construction
    pub pronunciation: String,
}

impl AbbreviationEntry {
    /// Create an entry. An empty pronunciation means the abbreviation is
    /// its own pronunciation.
    pub fn new(abbreviation: &str, kind: AbbreviationKind, pronunciation: &str) -> Self {
        let pronunciation = if pronunciation.is_empty() {
            abbreviation.to_string()
        } else {
            pronunciation.to_string()
        };
        Self {
            abbreviation: abbreviation.to_string(),
            kind,
            pronunciation,
        }
    }
}

/// Locations of the lexicon resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconSources {
    /// Acronym/initialism tables, loaded in order
    pub acronyms: Vec<PathBuf>,
    /// Newline-delimited common-word list
    pub common_words: PathBuf,
    /// Emoticon JSON map
    pub emoticons: PathBuf,
}

impl Default for LexiconSources {
    fn default() -> Self {
        Self {
            acronyms: vec![PathBuf::from("data/acronyms.csv")],
            common_words: PathBuf::from("data/common_words.txt"),
            emoticons: PathBuf::from("data/emoticons.json"),
        }
    }
}

/// Read-only dictionaries consulted by the rule stages
#[derive(Debug)]
pub struct LexiconStore {
    acronyms: HashMap<String, String>,
    initialisms: HashSet<String>,
    common_words: HashSet<String>,
    emoticons: HashMap<String, String>,
    emoticon_pattern: Regex,
}

impl LexiconStore {
    /// Load every resource named in `sources`. Any missing or malformed
    /// resource is a `ConfigLoad` error.
    pub fn load(sources: &LexiconSources) -> Result<Self> {
        if sources.acronyms.is_empty() {
            return Err(Error::config_load("acronyms", "no acronym tables configured"));
        }

        let mut entries = Vec::new();
        for path in &sources.acronyms {
            let content = loader::read_resource(path)?;
            let table = parse_abbreviation_table(&content, &path.display().to_string())?;
            log::debug!("Loaded {} abbreviations from {}", table.len(), path.display());
            entries.extend(table);
        }

        let words = parse_word_list(
            &loader::read_resource(&sources.common_words)?,
            &sources.common_words.display().to_string(),
        )?;
        let emoticons = parse_emoticons(
            &loader::read_resource(&sources.emoticons)?,
            &sources.emoticons.display().to_string(),
        )?;

        let store = Self::from_parts(entries, words, emoticons)?;
        log::info!(
            "Lexicon loaded: {} acronyms, {} initialisms, {} common words, {} emoticons",
            store.acronyms.len(),
            store.initialisms.len(),
            store.common_words.len(),
            store.emoticons.len()
        );
        Ok(store)
    }

    /// Load from a directory holding `acronyms.csv`, `common_words.txt`
    /// and `emoticons.json`
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        Self::load(&LexiconSources {
            acronyms: vec![dir.join("acronyms.csv")],
            common_words: dir.join("common_words.txt"),
            emoticons: dir.join("emoticons.json"),
        })
    }

    /// The resources compiled into the binary
    pub fn bundled() -> Result<Self> {
        let entries = parse_abbreviation_table(BUNDLED_ACRONYMS, "bundled acronyms")?;
        let words = parse_word_list(BUNDLED_COMMON_WORDS, "bundled common words")?;
        let emoticons = parse_emoticons(BUNDLED_EMOTICONS, "bundled emoticons")?;
        Self::from_parts(entries, words, emoticons)
    }

    /// Build a store from already parsed resources.
    ///
    /// Entries are applied in order. A later entry replaces an earlier one
    /// for the same abbreviation even across kinds, so each abbreviation
    /// ends up with exactly one outcome.
    pub fn from_parts(
        entries: Vec<AbbreviationEntry>,
        common_words: Vec<String>,
        emoticons: HashMap<String, String>,
    ) -> Result<Self> {
        let mut acronyms = HashMap::new();
        let mut initialisms = HashSet::new();

        for entry in entries {
            match entry.kind {
                AbbreviationKind::Acronym => {
                    initialisms.remove(&entry.abbreviation);
                    acronyms.insert(entry.abbreviation, entry.pronunciation);
                }
                AbbreviationKind::Initialism => {
                    acronyms.remove(&entry.abbreviation);
                    initialisms.insert(entry.abbreviation);
                }
            }
        }

        let common_words = common_words.into_iter().map(|w| w.to_lowercase()).collect();
        let emoticon_pattern = build_emoticon_pattern(&emoticons)?;

        Ok(Self {
            acronyms,
            initialisms,
            common_words,
            emoticons,
            emoticon_pattern,
        })
    }

    /// Pronunciation of `word` if it is a known acronym (case-sensitive)
    pub fn acronym(&self, word: &str) -> Option<&str> {
        self.acronyms.get(word).map(String::as_str)
    }

    /// Whether `word` is a known initialism (case-sensitive)
    pub fn is_initialism(&self, word: &str) -> bool {
        self.initialisms.contains(word)
    }

    /// Whether the lowercase form of `word` is a common English word
    pub fn is_common_word(&self, word: &str) -> bool {
        if self.common_words.contains(word) {
            return true;
        }
        self.common_words.contains(&word.to_lowercase())
    }

    /// Whether `word` has any dictionary outcome
    pub fn is_known_abbreviation(&self, word: &str) -> bool {
        self.acronyms.contains_key(word) || self.is_initialism(word)
    }

    /// Pattern matching any configured emoticon or the literal `//`
    pub fn emoticon_pattern(&self) -> &Regex {
        &self.emoticon_pattern
    }

    pub fn acronym_count(&self) -> usize {
        self.acronyms.len()
    }

    pub fn initialism_count(&self) -> usize {
        self.initialisms.len()
    }

    pub fn common_word_count(&self) -> usize {
        self.common_words.len()
    }

    pub fn emoticon_count(&self) -> usize {
        self.emoticons.len()
    }
}

/// Alternation of the escaped emoticons, longest first so `:-)` wins over `:-`
fn build_emoticon_pattern(emoticons: &HashMap<String, String>) -> Result<Regex> {
    let mut keys: Vec<&str> = emoticons.keys().map(String::as_str).collect();
    keys.push("//");
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    keys.dedup();

    let alternation = keys
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!("(?:{})", alternation))
        .map_err(|e| Error::config_load("emoticons", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(entries: Vec<AbbreviationEntry>) -> LexiconStore {
        LexiconStore::from_parts(
            entries,
            vec!["it".into(), "cat".into()],
            HashMap::from([(":)".to_string(), "smile".to_string())]),
        )
        .unwrap()
    }

    #[test]
    fn test_lookups() {
        let lex = store(vec![
            AbbreviationEntry::new("NASA", AbbreviationKind::Acronym, "nasa"),
            AbbreviationEntry::new("FBI", AbbreviationKind::Initialism, ""),
        ]);
        assert_eq!(lex.acronym("NASA"), Some("nasa"));
        assert_eq!(lex.acronym("nasa"), None);
        assert!(lex.is_initialism("FBI"));
        assert!(!lex.is_initialism("fbi"));
        assert!(lex.is_common_word("IT"));
        assert!(lex.is_common_word("cat"));
        assert!(!lex.is_common_word("dog"));
    }

    #[test]
    fn test_last_loaded_wins_across_kinds() {
        let lex = store(vec![
            AbbreviationEntry::new("GIF", AbbreviationKind::Initialism, ""),
            AbbreviationEntry::new("GIF", AbbreviationKind::Acronym, "jif"),
        ]);
        assert_eq!(lex.acronym("GIF"), Some("jif"));
        assert!(!lex.is_initialism("GIF"));

        let lex = store(vec![
            AbbreviationEntry::new("GIF", AbbreviationKind::Acronym, "jif"),
            AbbreviationEntry::new("GIF", AbbreviationKind::Initialism, ""),
        ]);
        assert_eq!(lex.acronym("GIF"), None);
        assert!(lex.is_initialism("GIF"));
    }

    #[test]
    fn test_emoticon_pattern() {
        let lex = store(vec![]);
        let pattern = lex.emoticon_pattern();
        assert_eq!(pattern.replace_all("hi :) there // now", ""), "hi  there  now");
    }

    #[test]
    fn test_bundled() {
        let lex = LexiconStore::bundled().unwrap();
        assert!(lex.acronym_count() > 0);
        assert!(lex.initialism_count() > 0);
        assert!(lex.is_common_word("the"));
        assert!(lex.emoticon_count() > 0);
    }

    #[test]
    fn test_load_missing_file() {
        let sources = LexiconSources {
            acronyms: vec![PathBuf::from("/nonexistent/acronyms.csv")],
            ..Default::default()
        };
        let err = LexiconStore::load(&sources).unwrap_err();
        assert!(matches!(err, Error::ConfigLoad { .. }));
    }
}
