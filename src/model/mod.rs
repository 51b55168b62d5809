//! External model seams
//!
//! The deep text normalizer and the abbreviation tagger are model-backed
//! services this crate only calls. They sit behind two narrow traits so the
//! pipeline can run against real services, test doubles, or the rule-only
//! implementations below.

mod gate;

pub use gate::ModelGate;

use crate::text::AbbreviationSpan;
use crate::{Error, Result};

/// Broad inverse text normalization, applied after the local rule stages
pub trait TextNormalizer: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str {
        "deep-normalizer"
    }

    fn normalize(&self, text: &str) -> Result<String>;
}

/// Flags spans likely to be abbreviations missing from the lexicon
pub trait AbbreviationTagger: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str {
        "abbreviation-tagger"
    }

    /// Spans use byte offsets into `text`
    fn tag(&self, text: &str) -> Result<Vec<AbbreviationSpan>>;
}

/// Rule-only normalizer: returns its input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughNormalizer;

impl TextNormalizer for PassthroughNormalizer {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn normalize(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Rule-only tagger: never flags anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTagger;

impl AbbreviationTagger for NullTagger {
    fn name(&self) -> &str {
        "null-tagger"
    }

    fn tag(&self, _text: &str) -> Result<Vec<AbbreviationSpan>> {
        Ok(Vec::new())
    }
}

/// Parse a tagger response: a JSON array of
/// `{word, startOffset, endOffset, confidenceScore}` objects
pub fn spans_from_json(json: &str) -> Result<Vec<AbbreviationSpan>> {
    let spans: Vec<AbbreviationSpan> = serde_json::from_str(json)?;
    for span in &spans {
        if span.start > span.end {
            return Err(Error::InvalidFormat(format!(
                "span '{}' ends before it starts ({}..{})",
                span.text, span.start, span.end
            )));
        }
    }
    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_only_collaborators() {
        assert_eq!(PassthroughNormalizer.normalize("CY 23").unwrap(), "CY 23");
        assert!(NullTagger.tag("NASA and CY").unwrap().is_empty());
    }

    #[test]
    fn test_spans_from_json() {
        let json = r#"[
            {"word": "CY", "startOffset": 0, "endOffset": 2, "confidenceScore": 0.91},
            {"word": "KPI", "startOffset": 7, "endOffset": 10, "confidenceScore": 0.4}
        ]"#;
        let spans = spans_from_json(json).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0], AbbreviationSpan::new("CY", 0, 2, 0.91));
        assert_eq!(spans[1].end, 10);
    }

    #[test]
    fn test_spans_from_json_rejects_bad_input() {
        assert!(spans_from_json("not json").is_err());
        let inverted = r#"[{"word": "X", "startOffset": 5, "endOffset": 2, "confidenceScore": 1.0}]"#;
        assert!(matches!(
            spans_from_json(inverted),
            Err(Error::InvalidFormat(_))
        ));
    }
}
