//! voicenorm - text normalization front end for speech synthesis
//!
//! Turns arbitrary input text into lowercase, speakable ASCII ready for a
//! sub-word tokenizer: numbers, currencies and units become words, URLs are
//! read out, emoji and symbols are stripped, and abbreviations are either
//! pronounced or spelled letter by letter.
//!
//! # Features
//! - Ordered regex cascades for numbers, currencies and units
//! - Lexicon-driven acronym and initialism resolution
//! - Optional deep normalizer and abbreviation tagger models, called under
//!   a concurrency limit and timeout with rule-only fallback
//! - Parallel batch normalization with Rayon
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use voicenorm::{pipeline::PipelineOptions, LexiconStore, TextFrontend};
//!
//! let lexicon = Arc::new(LexiconStore::bundled().unwrap());
//! let frontend = TextFrontend::with_lexicon(lexicon, PipelineOptions::default());
//!
//! assert_eq!(frontend.normalize("CY23"), "c y twenty three");
//! ```

pub mod config;
pub mod error;
pub mod lexicon;
pub mod model;
pub mod pipeline;
pub mod text;

pub use config::Config;
pub use error::{Error, Result};
pub use lexicon::LexiconStore;
pub use pipeline::TextFrontend;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Word boundary marker substituted for spaces before tokenization
pub const SPACE_MARKER: &str = "[SPACE]";

/// End of sequence marker
pub const STOP_MARKER: &str = "[STOP]";

/// Marker for characters outside the vocabulary
pub const UNK_MARKER: &str = "[UNK]";

/// Padding marker
pub const PAD_MARKER: &str = "[PAD]";
