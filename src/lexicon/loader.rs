//! Parsers for the lexicon resource files
//!
//! Parsers work on file contents so the bundled resources and on-disk
//! resources share one code path.

use super::{AbbreviationEntry, AbbreviationKind};
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Read a resource file, mapping every failure to a load error
pub fn read_resource(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::config_load(
            path.display().to_string(),
            "file does not exist",
        ));
    }
    std::fs::read_to_string(path)
        .map_err(|e| Error::config_load(path.display().to_string(), e.to_string()))
}

/// Parse an acronym/initialism table.
///
/// Columns: `Abbreviation, Full-Form, Type, Pronunciation?`. A header row is
/// skipped when its first column reads `Abbreviation`, as are lines starting
/// with `#`. Fields may be quoted so full forms can contain commas.
pub fn parse_abbreviation_table(content: &str, resource: &str) -> Result<Vec<AbbreviationEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut entries = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| Error::config_load(resource, e.to_string()))?;
        let line = record.position().map_or(index as u64 + 1, |p| p.line());

        if record.iter().all(str::is_empty) {
            continue;
        }
        if index == 0 && record[0].eq_ignore_ascii_case("abbreviation") {
            continue;
        }

        if record.len() < 3 || record.len() > 4 {
            return Err(Error::config_load(
                resource,
                format!("line {}: expected 3 or 4 columns, found {}", line, record.len()),
            ));
        }

        let abbreviation = &record[0];
        if abbreviation.is_empty() {
            return Err(Error::config_load(
                resource,
                format!("line {}: empty abbreviation", line),
            ));
        }

        let kind = match record[2].to_ascii_lowercase().as_str() {
            "acronym" => AbbreviationKind::Acronym,
            "initialism" => AbbreviationKind::Initialism,
            other => {
                return Err(Error::config_load(
                    resource,
                    format!("line {}: unknown abbreviation type '{}'", line, other),
                ))
            }
        };

        let pronunciation = record.get(3).unwrap_or("");

        entries.push(AbbreviationEntry::new(abbreviation, kind, pronunciation));
    }

    Ok(entries)
}

/// Parse a newline-delimited word list into lowercase words
pub fn parse_word_list(content: &str, resource: &str) -> Result<Vec<String>> {
    let words: Vec<String> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_lowercase())
        .collect();

    if words.is_empty() {
        return Err(Error::config_load(resource, "word list is empty"));
    }

    if words.windows(2).any(|w| w[0] > w[1]) {
        log::warn!("Word list {} is not sorted", resource);
    }

    Ok(words)
}

/// Parse the emoticon resource: a JSON object mapping emoticon to placeholder
pub fn parse_emoticons(content: &str, resource: &str) -> Result<HashMap<String, String>> {
    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| Error::config_load(resource, e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| Error::config_load(resource, "expected a JSON object"))?;

    let mut emoticons = HashMap::with_capacity(object.len());
    for (key, placeholder) in object {
        if key.is_empty() {
            return Err(Error::config_load(resource, "empty emoticon key"));
        }
        let placeholder = match placeholder {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        emoticons.insert(key.clone(), placeholder);
    }

    Ok(emoticons)
}
