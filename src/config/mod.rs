//! Configuration management for voicenorm

use crate::lexicon::LexiconSources;
use crate::model::ModelGate;
use crate::pipeline::PipelineOptions;
use crate::text::TokenizerConfig;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration for voicenorm
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lexicon resource locations
    pub lexicon: LexiconSources,
    /// Pipeline toggles
    pub pipeline: PipelineOptions,
    /// Limits for external model calls
    pub models: ModelsConfig,
    /// Tokenizer settings
    pub tokenizer: TokenizerConfig,
}

/// Admission control for the deep normalizer and abbreviation tagger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Model calls allowed in flight at once
    pub max_concurrent_calls: usize,
    /// Deadline per call, including the wait for a free slot
    pub timeout_ms: u64,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            max_concurrent_calls: num_cpus::get().max(1),
            timeout_ms: 2000,
        }
    }
}

impl ModelsConfig {
    /// Build the gate these limits describe
    pub fn gate(&self) -> ModelGate {
        ModelGate::new(
            self.max_concurrent_calls,
            Duration::from_millis(self.timeout_ms),
        )
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Create default configuration and save to file
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.lexicon.acronyms.is_empty() {
            return Err(Error::Config("at least one acronym table is required".into()));
        }
        for path in &self.lexicon.acronyms {
            if !path.exists() {
                log::warn!("Acronym table does not exist: {}", path.display());
            }
        }

        self.pipeline.validate()?;

        if self.models.max_concurrent_calls == 0 {
            return Err(Error::Config("max_concurrent_calls must be > 0".into()));
        }
        if self.models.timeout_ms == 0 {
            return Err(Error::Config("timeout_ms must be > 0".into()));
        }

        // Special markers must not share an id
        let t = &self.tokenizer;
        let ids = [t.stop_id, t.unk_id, t.space_id, t.pad_id];
        for (i, a) in ids.iter().enumerate() {
            if ids[i + 1..].contains(a) {
                return Err(Error::Config(format!(
                    "tokenizer special ids must be distinct, {} is used twice",
                    a
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::CleanerMode;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tokenizer.space_id, 2);
        assert!(config.models.max_concurrent_calls >= 1);
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voicenorm.yaml");

        let mut config = Config::default();
        config.pipeline.cleaners = CleanerMode::Basic;
        config.models.timeout_ms = 750;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.pipeline.cleaners, CleanerMode::Basic);
        assert_eq!(loaded.models.timeout_ms, 750);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "pipeline:\n  cleaners: transliteration\n  use_deep_normalizer: false\n  use_abbreviation_tagger: true\n  abbreviation_confidence_threshold: 0.8\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.pipeline.cleaners, CleanerMode::Transliteration);
        assert_eq!(config.models.timeout_ms, 2000);
        assert_eq!(config.lexicon.acronyms.len(), 1);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voicenorm.json");
        std::fs::write(&path, r#"{"models": {"max_concurrent_calls": 4, "timeout_ms": 100}}"#)
            .unwrap();

        let config = Config::load_json(&path).unwrap();
        assert_eq!(config.models.max_concurrent_calls, 4);
        assert_eq!(config.models.gate().capacity(), 4);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/nonexistent/voicenorm.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::default();
        config.models.max_concurrent_calls = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.models.timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.tokenizer.pad_id = config.tokenizer.unk_id;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.pipeline.abbreviation_confidence_threshold = -0.1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.lexicon.acronyms.clear();
        assert!(config.validate().is_err());
    }
}
