//! Typed errors raised by the matching engine

use thiserror::Error;

/// A single numeric field of a single entry could not be coerced.
///
/// Scoped to that field: the entry is still produced with the field left
/// empty, and the remaining entries are processed normally.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot read {field} of '{entry}' as a number: {value:?}")]
pub struct FieldCoercionError {
    /// Name of the entry (zone or room) the field belongs to
    pub entry: String,
    /// Field name, e.g. "temperature"
    pub field: String,
    /// The raw text that failed to parse
    pub value: String,
}

impl FieldCoercionError {
    pub fn new(entry: &str, field: &str, value: impl Into<String>) -> Self {
        Self {
            entry: entry.to_string(),
            field: field.to_string(),
            value: value.into(),
        }
    }
}

/// Invalid synonym or classification tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("classification rule #{index} has an empty pattern")]
    EmptyPattern { index: usize },

    #[error("classification rule #{index} has an empty label")]
    EmptyLabel { index: usize },

    #[error("default class label must not be empty")]
    EmptyDefaultLabel,

    #[error("synonym entry #{index} has a term that normalizes to nothing")]
    EmptyTerm { index: usize },

    #[error("synonym term '{term}' is listed more than once")]
    DuplicateTerm { term: String },
}
