//! Corpus parsing.
//!
//! A corpus source is a JSON document in one of two shapes:
//!
//! - Object form: `{ "<question_id>": { "question_text": "..." }, ... }`
//! - Array form: `[ { "question_id": "...", "question_text": "..." }, ... ]`
//!   where a missing `question_id` defaults to the positional index.
//!
//! Entries whose `question_text` is missing, non-string, or empty are
//! silently dropped; the drop count is surfaced through [`LoadReport`].
//! Any other top-level shape is rejected before the index mutates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{QuestionIndexError, Result};

/// A single survey question. Immutable once loaded; the whole record
/// sequence is replaced on the next load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Identifier unique within a loaded corpus.
    pub question_id: String,

    /// Non-empty question text.
    pub question_text: String,
}

/// Outcome of a corpus load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Number of records loaded.
    pub loaded: usize,

    /// Number of entries dropped for lacking usable question text.
    pub dropped: usize,
}

/// Normalized parse result, not yet embedded.
#[derive(Debug)]
pub(crate) struct ParsedCorpus {
    pub records: Vec<QuestionRecord>,
    pub dropped: usize,
}

/// Normalize a corpus source into question records.
pub(crate) fn parse_corpus(source: &Value) -> Result<ParsedCorpus> {
    match source {
        Value::Object(entries) => {
            let mut records = Vec::with_capacity(entries.len());
            let mut dropped = 0;

            for (question_id, entry) in entries {
                match question_text_of(entry) {
                    Some(question_text) => records.push(QuestionRecord {
                        question_id: question_id.clone(),
                        question_text,
                    }),
                    None => dropped += 1,
                }
            }

            Ok(ParsedCorpus { records, dropped })
        }
        Value::Array(entries) => {
            let mut records = Vec::with_capacity(entries.len());
            let mut dropped = 0;

            for (position, entry) in entries.iter().enumerate() {
                match question_text_of(entry) {
                    Some(question_text) => records.push(QuestionRecord {
                        question_id: id_of(entry, position),
                        question_text,
                    }),
                    None => dropped += 1,
                }
            }

            Ok(ParsedCorpus { records, dropped })
        }
        other => Err(QuestionIndexError::UnsupportedFormat(format!(
            "expected a JSON object or array of questions, got {}",
            json_type_name(other)
        ))),
    }
}

/// Extract usable question text from an entry, if any.
fn question_text_of(entry: &Value) -> Option<String> {
    entry
        .get("question_text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// The entry's own id when present, otherwise its positional index.
fn id_of(entry: &Value, position: usize) -> String {
    match entry.get("question_id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => position.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_object_form() {
        let source = json!({
            "1": {"question_text": "How satisfied are you with your job?"},
            "2": {"question_text": "What is your annual household income?"}
        });

        let parsed = parse_corpus(&source).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.dropped, 0);
        assert!(
            parsed
                .records
                .iter()
                .any(|r| r.question_id == "1"
                    && r.question_text == "How satisfied are you with your job?")
        );
    }

    #[test]
    fn test_array_form_with_ids() {
        let source = json!([
            {"question_id": "q-7", "question_text": "A"},
            {"question_id": 12, "question_text": "B"}
        ]);

        let parsed = parse_corpus(&source).unwrap();
        assert_eq!(parsed.records[0].question_id, "q-7");
        assert_eq!(parsed.records[1].question_id, "12");
    }

    #[test]
    fn test_array_form_defaults_to_positional_ids() {
        let source = json!([
            {"question_text": "A"},
            {"question_text": "B"}
        ]);

        let parsed = parse_corpus(&source).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].question_id, "0");
        assert_eq!(parsed.records[0].question_text, "A");
        assert_eq!(parsed.records[1].question_id, "1");
        assert_eq!(parsed.records[1].question_text, "B");
    }

    #[test]
    fn test_entries_without_text_are_dropped() {
        let source = json!({
            "1": {"question_text": "Kept"},
            "2": {"label": "no text field"},
            "3": {"question_text": ""},
            "4": {"question_text": 42}
        });

        let parsed = parse_corpus(&source).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.dropped, 3);
    }

    #[test]
    fn test_array_of_bare_strings_drops_everything() {
        let source = json!(["just a string", "another string"]);

        let parsed = parse_corpus(&source).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.dropped, 2);
    }

    #[test]
    fn test_unsupported_top_level_shapes() {
        for source in [json!("text"), json!(42), json!(true), json!(null)] {
            let result = parse_corpus(&source);
            assert!(matches!(
                result,
                Err(QuestionIndexError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn test_empty_object_parses_to_zero_records() {
        let parsed = parse_corpus(&json!({})).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.dropped, 0);
    }
}
