//! Tokenizer boundary
//!
//! The acoustic model's sub-word tokenizer sits behind the [`Tokenizer`]
//! trait. [`VoiceTokenizer`] is a greedy longest-match implementation over
//! a vocabulary file, with a small character vocabulary as the default.

use crate::{Error, Result, PAD_MARKER, SPACE_MARKER, STOP_MARKER, UNK_MARKER};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Characters in the default vocabulary, after the special markers
const DEFAULT_CHARACTERS: &str = "!'(),-.:;?abcdefghijklmnopqrstuvwxyz0123456789";

/// Tokenizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Vocabulary JSON; `None` uses the built-in character vocabulary
    pub vocab_path: Option<PathBuf>,
    /// End of sequence token ID
    pub stop_id: i64,
    /// Unknown token ID
    pub unk_id: i64,
    /// Word boundary token ID
    pub space_id: i64,
    /// Padding token ID
    pub pad_id: i64,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            vocab_path: None,
            stop_id: 0,
            unk_id: 1,
            space_id: 2,
            pad_id: 3,
        }
    }
}

/// Result of encoding one string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    pub ids: Vec<i64>,
    /// Characters that fell outside the vocabulary and became `[UNK]`
    pub unresolved: Vec<char>,
}

/// Encode/decode contract of the downstream tokenizer
pub trait Tokenizer: Send + Sync {
    /// Encode normalized text; spaces become word-boundary markers
    fn encode(&self, text: &str) -> Result<Encoding>;

    /// Decode ids, dropping stop, padding and unknown markers
    fn decode(&self, ids: &[i64]) -> Result<String>;

    fn vocab_size(&self) -> usize;
}

/// Greedy longest-match tokenizer
#[derive(Debug)]
pub struct VoiceTokenizer {
    config: TokenizerConfig,
    token_to_id: HashMap<String, i64>,
    id_to_token: HashMap<i64, String>,
    /// Longest token, in characters
    max_token_chars: usize,
}

impl VoiceTokenizer {
    /// Create a tokenizer with the built-in character vocabulary
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        let mut vocab = HashMap::new();
        vocab.insert(STOP_MARKER.to_string(), config.stop_id);
        vocab.insert(UNK_MARKER.to_string(), config.unk_id);
        vocab.insert(SPACE_MARKER.to_string(), config.space_id);
        vocab.insert(PAD_MARKER.to_string(), config.pad_id);

        let mut next_id = [config.stop_id, config.unk_id, config.space_id, config.pad_id]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1;
        for c in DEFAULT_CHARACTERS.chars() {
            vocab.insert(c.to_string(), next_id);
            next_id += 1;
        }

        Self::from_vocab(config, vocab)
    }

    /// Build from the configuration, loading `vocab_path` when set
    pub fn from_config(config: TokenizerConfig) -> Result<Self> {
        match config.vocab_path.clone() {
            Some(path) => Self::load(path, config),
            None => Self::new(config),
        }
    }

    /// Load a vocabulary file: either a flat `{token: id}` object or a
    /// tokenizer file with the map under `model.vocab`. Marker ids found in
    /// the file take precedence over the configured ones.
    pub fn load<P: AsRef<Path>>(path: P, config: TokenizerConfig) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let json: serde_json::Value = serde_json::from_str(&content)?;
        let vocab_value = json
            .get("model")
            .and_then(|m| m.get("vocab"))
            .unwrap_or(&json);

        let vocab: HashMap<String, i64> = serde_json::from_value(vocab_value.clone())
            .map_err(|e| Error::InvalidFormat(format!("{}: {}", path.display(), e)))?;

        let mut config = config;
        config.vocab_path = Some(path.to_path_buf());
        for (marker, slot) in [
            (STOP_MARKER, &mut config.stop_id),
            (UNK_MARKER, &mut config.unk_id),
            (SPACE_MARKER, &mut config.space_id),
            (PAD_MARKER, &mut config.pad_id),
        ] {
            if let Some(&id) = vocab.get(marker) {
                *slot = id;
            }
        }

        // Optional markers absent from the file must not shadow a real token
        for (marker, slot) in [
            (STOP_MARKER, &mut config.stop_id),
            (PAD_MARKER, &mut config.pad_id),
        ] {
            if !vocab.contains_key(marker) && vocab.values().any(|&id| id == *slot) {
                *slot = -1;
            }
        }

        for required in [UNK_MARKER, SPACE_MARKER] {
            if !vocab.contains_key(required) {
                return Err(Error::InvalidFormat(format!(
                    "{}: vocabulary has no {} token",
                    path.display(),
                    required
                )));
            }
        }

        log::info!("Loaded {} tokens from {}", vocab.len(), path.display());
        Self::from_vocab(config, vocab)
    }

    fn from_vocab(config: TokenizerConfig, token_to_id: HashMap<String, i64>) -> Result<Self> {
        if token_to_id.is_empty() {
            return Err(Error::Tokenization("empty vocabulary".into()));
        }

        let id_to_token = token_to_id.iter().map(|(t, &id)| (id, t.clone())).collect();
        let max_token_chars = token_to_id
            .keys()
            .map(|t| t.chars().count())
            .max()
            .unwrap_or(1);

        Ok(Self {
            config,
            token_to_id,
            id_to_token,
            max_token_chars,
        })
    }

    pub fn stop_id(&self) -> i64 {
        self.config.stop_id
    }

    pub fn unk_id(&self) -> i64 {
        self.config.unk_id
    }

    pub fn space_id(&self) -> i64 {
        self.config.space_id
    }

    pub fn pad_id(&self) -> i64 {
        self.config.pad_id
    }

    /// Pad sequences to the same length
    pub fn pad_sequences(&self, sequences: &[Vec<i64>], max_len: Option<usize>) -> Vec<Vec<i64>> {
        let max_length =
            max_len.unwrap_or_else(|| sequences.iter().map(|s| s.len()).max().unwrap_or(0));

        sequences
            .iter()
            .map(|seq| {
                let mut padded = seq.clone();
                padded.resize(max_length.max(padded.len()), self.config.pad_id);
                padded.truncate(max_length);
                padded
            })
            .collect()
    }
}

impl Tokenizer for VoiceTokenizer {
    fn encode(&self, text: &str) -> Result<Encoding> {
        let marked = text.replace(' ', SPACE_MARKER);
        let chars: Vec<(usize, char)> = marked.char_indices().collect();

        let mut ids = Vec::with_capacity(chars.len());
        let mut unresolved = Vec::new();
        let mut k = 0;

        while k < chars.len() {
            let start = chars[k].0;
            let longest = self.max_token_chars.min(chars.len() - k);

            let matched = (1..=longest).rev().find_map(|n| {
                let end = chars.get(k + n).map(|(i, _)| *i).unwrap_or(marked.len());
                self.token_to_id.get(&marked[start..end]).map(|&id| (id, n))
            });

            match matched {
                Some((id, n)) => {
                    ids.push(id);
                    k += n;
                }
                None => {
                    ids.push(self.config.unk_id);
                    unresolved.push(chars[k].1);
                    k += 1;
                }
            }
        }

        if !unresolved.is_empty() {
            log::warn!(
                "{} character(s) outside the vocabulary mapped to {}: {:?}",
                unresolved.len(),
                UNK_MARKER,
                unresolved
            );
        }

        Ok(Encoding { ids, unresolved })
    }

    fn decode(&self, ids: &[i64]) -> Result<String> {
        let mut text = String::new();

        for &id in ids {
            if id == self.config.stop_id || id == self.config.pad_id || id == self.config.unk_id {
                continue;
            }
            if id == self.config.space_id {
                text.push(' ');
                continue;
            }
            match self.id_to_token.get(&id) {
                Some(token) => text.push_str(token),
                None => log::warn!("Skipping id {} not in vocabulary", id),
            }
        }

        Ok(text)
    }

    fn vocab_size(&self) -> usize {
        self.token_to_id.len()
    }
}
