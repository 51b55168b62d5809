//! Text front end: raw text in, speakable lowercase ASCII out

use super::{CleanerMode, PipelineOptions, PipelineStage};
use crate::{
    config::Config,
    lexicon::LexiconStore,
    model::{AbbreviationTagger, ModelGate, TextNormalizer},
    text::{
        actionable_spans, cleaners, normalize_numbers, pronounce_urls, segment_alphanumeric,
        strip_symbols, AbbreviationResolver, AbbreviationSpan, Encoding, Tokenizer,
    },
    Error, Result,
};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

/// Normalization front end
///
/// Holds the shared lexicon and optional model collaborators. Every call is
/// independent, so one instance can serve many threads.
pub struct TextFrontend {
    lexicon: Arc<LexiconStore>,
    options: PipelineOptions,
    normalizer: Option<Arc<dyn TextNormalizer>>,
    tagger: Option<Arc<dyn AbbreviationTagger>>,
    gate: ModelGate,
}

impl TextFrontend {
    /// Create a front end from configuration, loading the lexicon from disk
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        log::info!("Initializing text front end...");
        let lexicon = Arc::new(LexiconStore::load(&config.lexicon)?);

        Ok(Self::with_lexicon(lexicon, config.pipeline.clone()).with_gate(config.models.gate()))
    }

    /// Create a front end over an already loaded lexicon
    pub fn with_lexicon(lexicon: Arc<LexiconStore>, options: PipelineOptions) -> Self {
        Self {
            lexicon,
            options,
            normalizer: None,
            tagger: None,
            gate: crate::config::ModelsConfig::default().gate(),
        }
    }

    /// Attach a deep text normalizer
    pub fn with_normalizer(mut self, normalizer: Arc<dyn TextNormalizer>) -> Self {
        log::info!("Deep normalizer attached: {}", normalizer.name());
        self.normalizer = Some(normalizer);
        self
    }

    /// Attach an abbreviation tagger
    pub fn with_tagger(mut self, tagger: Arc<dyn AbbreviationTagger>) -> Self {
        log::info!("Abbreviation tagger attached: {}", tagger.name());
        self.tagger = Some(tagger);
        self
    }

    /// Replace the admission gate used for model calls
    pub fn with_gate(mut self, gate: ModelGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn lexicon(&self) -> &LexiconStore {
        &self.lexicon
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Stages this front end runs, in order
    pub fn stages(&self) -> Vec<PipelineStage> {
        match self.options.cleaners {
            CleanerMode::English => PipelineStage::all(),
            CleanerMode::Basic => vec![PipelineStage::Lowercasing, PipelineStage::FinalWhitespace],
            CleanerMode::Transliteration => vec![
                PipelineStage::AsciiTransliteration,
                PipelineStage::Lowercasing,
                PipelineStage::FinalWhitespace,
            ],
        }
    }

    /// Run the local English stages that precede the deep normalizer
    pub fn prenormalize(&self, text: &str) -> String {
        PipelineStage::prenormalization()
            .into_iter()
            .fold(text.to_string(), |acc, stage| self.apply_stage(stage, &acc))
    }

    /// Normalize one input. Model failures degrade to the rule-only stages,
    /// so this never fails.
    pub fn normalize(&self, text: &str) -> String {
        let start = Instant::now();
        let normalized = self
            .stages()
            .into_iter()
            .fold(text.to_string(), |acc, stage| self.apply_stage(stage, &acc));

        log::debug!(
            "Normalized {} chars in {:.2}ms",
            text.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        normalized
    }

    /// Normalize independent inputs in parallel
    pub fn normalize_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<String> {
        texts
            .par_iter()
            .map(|text| self.normalize(text.as_ref()))
            .collect()
    }

    /// Normalize while recording the text after every stage
    pub fn trace(&self, text: &str) -> Vec<(PipelineStage, String)> {
        let mut current = text.to_string();
        self.stages()
            .into_iter()
            .map(|stage| {
                current = self.apply_stage(stage, &current);
                (stage, current.clone())
            })
            .collect()
    }

    /// Normalize, then encode with `tokenizer`
    pub fn encode(&self, text: &str, tokenizer: &dyn Tokenizer) -> Result<Encoding> {
        let normalized = self.normalize(text);
        tokenizer.encode(&normalized)
    }

    fn apply_stage(&self, stage: PipelineStage, text: &str) -> String {
        let lexicon = self.lexicon.as_ref();
        let output = match stage {
            PipelineStage::UrlPronunciation => pronounce_urls(text, lexicon),
            PipelineStage::AlphanumericSegmentation => segment_alphanumeric(text),
            PipelineStage::NumericNormalization => normalize_numbers(text),
            PipelineStage::EllipsisCollapse => cleaners::collapse_ellipsis(text),
            PipelineStage::SymbolStripping => strip_symbols(text, lexicon),
            PipelineStage::AsciiTransliteration => cleaners::convert_to_ascii(text),
            PipelineStage::PronounOverrides => cleaners::apply_pronoun_overrides(text),
            PipelineStage::WhitespaceCollapse | PipelineStage::FinalWhitespace => {
                cleaners::collapse_whitespace(text)
            }
            PipelineStage::QuoteRemoval => cleaners::remove_quotes(text),
            PipelineStage::DeepNormalization => self.deep_normalize(text),
            PipelineStage::AbbreviationResolution => {
                let spans = self.tag_abbreviations(text);
                AbbreviationResolver::new(lexicon).resolve(text, &spans)
            }
            PipelineStage::SentenceAbbreviations => cleaners::expand_sentence_abbreviations(text),
            PipelineStage::ColonWords => cleaners::expand_colons(text),
            PipelineStage::PointWords => cleaners::expand_in_word_dots(text),
            PipelineStage::Lowercasing => cleaners::lowercase(text),
        };

        log::trace!("{}: {:?}", stage.name(), output);
        output
    }

    fn deep_normalize(&self, text: &str) -> String {
        let normalizer = match &self.normalizer {
            Some(normalizer) if self.options.use_deep_normalizer => Arc::clone(normalizer),
            _ => return text.to_string(),
        };

        let name = normalizer.name().to_string();
        let input = text.to_string();
        match self.gate.run(&name, move || normalizer.normalize(&input)) {
            Ok(normalized) => normalized,
            Err(e) => {
                log_degraded(&name, &e);
                text.to_string()
            }
        }
    }

    /// Actionable tagger spans for `text`, empty when no tagger runs
    fn tag_abbreviations(&self, text: &str) -> Vec<AbbreviationSpan> {
        let tagger = match &self.tagger {
            Some(tagger) if self.options.use_abbreviation_tagger => Arc::clone(tagger),
            _ => return Vec::new(),
        };

        let name = tagger.name().to_string();
        let input = text.to_string();
        match self.gate.run(&name, move || tagger.tag(&input)) {
            Ok(spans) => {
                let spans = actionable_spans(&spans, self.options.abbreviation_confidence_threshold);
                log::debug!("{} flagged {} span(s)", name, spans.len());
                spans
            }
            Err(e) => {
                log_degraded(&name, &e);
                Vec::new()
            }
        }
    }
}

/// Log a collaborator failure; the caller falls back to rule-only output
fn log_degraded(model: &str, error: &Error) {
    if error.is_recoverable() {
        log::warn!("{} unavailable, continuing rule-only: {}", model, error);
    } else {
        log::error!("{} returned an unexpected error, continuing rule-only: {}", model, error);
    }
}

impl std::fmt::Debug for TextFrontend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFrontend")
            .field("options", &self.options)
            .field("normalizer", &self.normalizer.as_ref().map(|n| n.name().to_string()))
            .field("tagger", &self.tagger.as_ref().map(|t| t.name().to_string()))
            .field("gate", &self.gate)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{AbbreviationEntry, AbbreviationKind};
    use std::collections::HashMap;
    use std::time::Duration;

    fn lexicon() -> Arc<LexiconStore> {
        let entries = vec![
            AbbreviationEntry::new("NASA", AbbreviationKind::Acronym, "nasa"),
            AbbreviationEntry::new("GIF", AbbreviationKind::Acronym, "jif"),
            AbbreviationEntry::new("FBI", AbbreviationKind::Initialism, ""),
        ];
        let words = ["a", "i", "it", "the", "cat", "sat", "on", "mat", "we", "love", "page"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let mut emoticons = HashMap::new();
        emoticons.insert(":)".to_string(), "smile".to_string());
        Arc::new(LexiconStore::from_parts(entries, words, emoticons).unwrap())
    }

    fn frontend() -> TextFrontend {
        TextFrontend::with_lexicon(lexicon(), PipelineOptions::default())
    }

    struct ShoutingNormalizer;

    impl TextNormalizer for ShoutingNormalizer {
        fn normalize(&self, text: &str) -> Result<String> {
            Ok(text.replace("sat", "SAT"))
        }
    }

    struct FailingNormalizer;

    impl TextNormalizer for FailingNormalizer {
        fn normalize(&self, _text: &str) -> Result<String> {
            Err(Error::ExternalModel {
                model: "failing".into(),
                reason: "offline".into(),
            })
        }
    }

    struct SlowNormalizer;

    impl TextNormalizer for SlowNormalizer {
        fn normalize(&self, _text: &str) -> Result<String> {
            std::thread::sleep(Duration::from_millis(300));
            Ok("too late".into())
        }
    }

    /// Tags every occurrence of a fixed word
    struct WordTagger {
        word: &'static str,
        score: f32,
    }

    impl AbbreviationTagger for WordTagger {
        fn tag(&self, text: &str) -> Result<Vec<AbbreviationSpan>> {
            Ok(text
                .match_indices(self.word)
                .map(|(i, w)| AbbreviationSpan::new(w, i, i + w.len(), self.score))
                .collect())
        }
    }

    #[test]
    fn test_alphanumeric_initialism() {
        assert_eq!(frontend().normalize("CY23"), "c y twenty three");
    }

    #[test]
    fn test_currency_and_acronyms() {
        assert_eq!(
            frontend().normalize("NASA paid $5.50 to the FBI."),
            "nasa paid five dollars, fifty cents to the f b i."
        );
    }

    #[test]
    fn test_possessive_acronym() {
        assert_eq!(frontend().normalize("NASA's GIF"), "nasa's jif");
    }

    #[test]
    fn test_pronouns_are_not_spelled() {
        assert_eq!(frontend().normalize("WE love IT"), "we love it");
    }

    #[test]
    fn test_sentence_cleanup() {
        assert_eq!(
            frontend().normalize("Mr. Smith   met  \"Dr. Jones\" at 10:30"),
            "mister smith met doctor jones at ten colon thirty"
        );
    }

    #[test]
    fn test_emoticons_removed() {
        assert_eq!(frontend().normalize("the cat sat :) on the mat"), "the cat sat on the mat");
    }

    #[test]
    fn test_url() {
        let out = frontend().normalize("see http://abc.com/a?x=1");
        assert!(out.starts_with("see h t t p slash abc dot com slash a"));
        assert!(out.contains("x equal one"));
    }

    #[test]
    fn test_basic_mode() {
        let options = PipelineOptions::default().with_cleaners(CleanerMode::Basic);
        let frontend = TextFrontend::with_lexicon(lexicon(), options);
        assert_eq!(frontend.normalize("  NASA  paid $5 "), "nasa paid $5");
    }

    #[test]
    fn test_transliteration_mode() {
        let options = PipelineOptions::default().with_cleaners(CleanerMode::Transliteration);
        let frontend = TextFrontend::with_lexicon(lexicon(), options);
        assert_eq!(frontend.normalize("Café   NAÏVE"), "cafe naive");
    }

    #[test]
    fn test_deep_normalizer_applied() {
        let frontend = frontend().with_normalizer(Arc::new(ShoutingNormalizer));
        // "SAT" is all caps but "sat" is a common word, so it is not spelled
        assert_eq!(frontend.normalize("the cat sat"), "the cat sat");
        let traced = frontend.trace("the cat sat");
        let deep = traced
            .iter()
            .find(|(stage, _)| *stage == PipelineStage::DeepNormalization)
            .map(|(_, text)| text.as_str());
        assert_eq!(deep, Some("the cat SAT"));
    }

    #[test]
    fn test_deep_normalizer_toggle() {
        let mut options = PipelineOptions::default();
        options.use_deep_normalizer = false;
        let frontend = TextFrontend::with_lexicon(lexicon(), options)
            .with_normalizer(Arc::new(SlowNormalizer));
        assert_eq!(frontend.normalize("the cat"), "the cat");
    }

    #[test]
    fn test_failing_normalizer_degrades() {
        let frontend = frontend().with_normalizer(Arc::new(FailingNormalizer));
        assert_eq!(frontend.normalize("CY23"), "c y twenty three");
    }

    #[test]
    fn test_slow_normalizer_times_out() {
        let frontend = frontend()
            .with_normalizer(Arc::new(SlowNormalizer))
            .with_gate(ModelGate::new(1, Duration::from_millis(20)));
        assert_eq!(frontend.normalize("the cat"), "the cat");
    }

    #[test]
    fn test_tagger_spells_flagged_common_word() {
        // Not all caps, so only the tag marks it as an abbreviation
        let frontend = frontend().with_tagger(Arc::new(WordTagger {
            word: "Kpi",
            score: 0.9,
        }));
        assert_eq!(frontend.normalize("the Kpi page"), "the k p i page");
    }

    #[test]
    fn test_tagger_below_threshold_ignored() {
        let frontend = frontend().with_tagger(Arc::new(WordTagger {
            word: "Kpi",
            score: 0.2,
        }));
        assert_eq!(frontend.normalize("the Kpi page"), "the kpi page");
    }

    #[test]
    fn test_tagger_does_not_override_common_words() {
        let frontend = frontend().with_tagger(Arc::new(WordTagger {
            word: "cat",
            score: 0.99,
        }));
        assert_eq!(frontend.normalize("the cat"), "the cat");
    }

    #[test]
    fn test_normalize_batch_matches_sequential() {
        let frontend = frontend();
        let inputs = vec!["CY23", "NASA's GIF", "the cat sat :)", "$1"];
        let batch = frontend.normalize_batch(&inputs);
        let sequential: Vec<String> = inputs.iter().map(|t| frontend.normalize(t)).collect();
        assert_eq!(batch, sequential);
        assert_eq!(batch[3], "one dollar");
    }

    #[test]
    fn test_trace_covers_every_stage() {
        let frontend = frontend();
        let trace = frontend.trace("CY23");
        assert_eq!(trace.len(), PipelineStage::all().len());
        assert_eq!(trace[1], (PipelineStage::AlphanumericSegmentation, "CY 23".to_string()));
        assert_eq!(trace.last().map(|(_, t)| t.as_str()), Some("c y twenty three"));
    }

    #[test]
    fn test_prenormalize_keeps_case() {
        assert_eq!(frontend().prenormalize("CY23  \"ok\""), "CY twenty three ok");
    }

    #[test]
    fn test_encode() {
        let tokenizer =
            crate::text::VoiceTokenizer::new(crate::text::TokenizerConfig::default()).unwrap();
        let encoding = frontend().encode("CY23", &tokenizer).unwrap();
        assert!(encoding.unresolved.is_empty());
        assert_eq!(tokenizer.decode(&encoding.ids).unwrap(), "c y twenty three");
    }
}
