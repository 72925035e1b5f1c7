use serde::{Deserialize, Serialize};
use yomikindle_core::dictionary::{Definition, DictionaryEntry};
use yomikindle_core::error::SchemaError;

/// Term-bank row as stored on disk:
/// `[term, reading, definitionTag, inflectionClass, frequency, definitions, sequence, tag]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermBankRow(
    pub String,
    pub String,
    pub Option<String>,
    pub String,
    pub i64,
    pub Vec<Definition>,
    pub i64,
    pub String,
);

impl From<TermBankRow> for DictionaryEntry {
    fn from(row: TermBankRow) -> Self {
        let TermBankRow(term, reading, definition_tag, inflection_class, frequency, definitions, sequence, tag) =
            row;
        DictionaryEntry {
            term,
            reading,
            definition_tag,
            inflection_class,
            frequency,
            definitions,
            sequence,
            tag,
        }
    }
}

impl TryFrom<&DictionaryEntry> for TermBankRow {
    type Error = SchemaError;

    /// Fails when the inflection class holds a tag outside the closed set
    fn try_from(entry: &DictionaryEntry) -> Result<Self, Self::Error> {
        entry.validate_inflection_class()?;
        Ok(TermBankRow(
            entry.term.clone(),
            entry.reading.clone(),
            entry.definition_tag.clone(),
            entry.inflection_class.clone(),
            entry.frequency,
            entry.definitions.clone(),
            entry.sequence,
            entry.tag.clone(),
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid entry: {0}")]
    InvalidEntry(#[from] SchemaError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
