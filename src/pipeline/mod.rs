//! Normalization pipeline orchestration
//!
//! Runs the rule stages in a fixed order around the two external model
//! calls and hands the result to the tokenizer.

mod frontend;

pub use frontend::TextFrontend;

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Pipeline stage enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    UrlPronunciation,
    AlphanumericSegmentation,
    NumericNormalization,
    EllipsisCollapse,
    SymbolStripping,
    AsciiTransliteration,
    PronounOverrides,
    WhitespaceCollapse,
    QuoteRemoval,
    DeepNormalization,
    AbbreviationResolution,
    SentenceAbbreviations,
    ColonWords,
    PointWords,
    FinalWhitespace,
    Lowercasing,
}

impl PipelineStage {
    /// Get stage name
    pub fn name(&self) -> &'static str {
        match self {
            PipelineStage::UrlPronunciation => "URL Pronunciation",
            PipelineStage::AlphanumericSegmentation => "Alphanumeric Segmentation",
            PipelineStage::NumericNormalization => "Numeric Normalization",
            PipelineStage::EllipsisCollapse => "Ellipsis Collapse",
            PipelineStage::SymbolStripping => "Symbol Stripping",
            PipelineStage::AsciiTransliteration => "ASCII Transliteration",
            PipelineStage::PronounOverrides => "Pronoun Overrides",
            PipelineStage::WhitespaceCollapse => "Whitespace Collapse",
            PipelineStage::QuoteRemoval => "Quote Removal",
            PipelineStage::DeepNormalization => "Deep Normalization",
            PipelineStage::AbbreviationResolution => "Abbreviation Resolution",
            PipelineStage::SentenceAbbreviations => "Sentence Abbreviations",
            PipelineStage::ColonWords => "Colon Words",
            PipelineStage::PointWords => "Point Words",
            PipelineStage::FinalWhitespace => "Final Whitespace",
            PipelineStage::Lowercasing => "Lowercasing",
        }
    }

    /// Get all stages in order
    pub fn all() -> Vec<PipelineStage> {
        let mut stages = Self::prenormalization();
        stages.extend([
            PipelineStage::DeepNormalization,
            PipelineStage::AbbreviationResolution,
            PipelineStage::SentenceAbbreviations,
            PipelineStage::ColonWords,
            PipelineStage::PointWords,
            PipelineStage::FinalWhitespace,
            PipelineStage::Lowercasing,
        ]);
        stages
    }

    /// Local stages run before the deep normalizer, in order
    pub fn prenormalization() -> Vec<PipelineStage> {
        vec![
            PipelineStage::UrlPronunciation,
            PipelineStage::AlphanumericSegmentation,
            PipelineStage::NumericNormalization,
            PipelineStage::EllipsisCollapse,
            PipelineStage::SymbolStripping,
            PipelineStage::AsciiTransliteration,
            PipelineStage::PronounOverrides,
            PipelineStage::WhitespaceCollapse,
            PipelineStage::QuoteRemoval,
        ]
    }

    /// Whether the stage calls an external model
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            PipelineStage::DeepNormalization | PipelineStage::AbbreviationResolution
        )
    }
}

/// Which cleaner set runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanerMode {
    /// Full English pipeline
    #[default]
    English,
    /// Lowercase and collapse whitespace only
    Basic,
    /// ASCII transliteration, lowercase, collapse whitespace
    Transliteration,
}

/// Pipeline feature toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOptions {
    pub cleaners: CleanerMode,
    /// Call the deep normalizer when one is attached
    pub use_deep_normalizer: bool,
    /// Call the abbreviation tagger when one is attached
    pub use_abbreviation_tagger: bool,
    /// Tagger spans must score above this to count
    pub abbreviation_confidence_threshold: f32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            cleaners: CleanerMode::English,
            use_deep_normalizer: true,
            use_abbreviation_tagger: true,
            abbreviation_confidence_threshold: 0.5,
        }
    }
}

impl PipelineOptions {
    /// Rule-only English pipeline
    pub fn rule_only() -> Self {
        Self {
            use_deep_normalizer: false,
            use_abbreviation_tagger: false,
            ..Self::default()
        }
    }

    pub fn with_cleaners(mut self, cleaners: CleanerMode) -> Self {
        self.cleaners = cleaners;
        self
    }

    /// Validate options
    pub fn validate(&self) -> Result<()> {
        let threshold = self.abbreviation_confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::Config(format!(
                "abbreviation_confidence_threshold must be within [0, 1], got {}",
                threshold
            )));
        }
        Ok(())
    }
}
