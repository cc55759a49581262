//! Core types for packaged-deck extraction.

use serde::{Deserialize, Serialize};

/// Separator between note field values in the `flds` column (ASCII unit
/// separator).
pub const FIELD_SEPARATOR: char = '\x1f';

/// A question/answer pair derived from one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub question: String,
    pub answer: String,
}

/// Note-template variant, recognized from the model's display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Cloze-deletion template; field 0 carries the cloze text.
    Cloze,
    /// Two-field question/answer template.
    Basic,
    /// Anything else; notes of this kind cannot be presented.
    Other,
}

impl TemplateKind {
    /// Classify a model by its display name (case-insensitive substring
    /// match, "cloze" checked before "basic").
    pub fn from_model_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("cloze") {
            Self::Cloze
        } else if lower.contains("basic") {
            Self::Basic
        } else {
            Self::Other
        }
    }
}

/// Deck descriptor as stored in the `col.decks` JSON column.
#[derive(Debug, Clone, Deserialize)]
pub struct DeckInfo {
    #[serde(default)]
    pub name: String,
}

/// Note-template descriptor as stored in the `col.models` JSON column.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub name: String,
}

/// Raw note row: owning template id plus split field values.
#[derive(Debug, Clone)]
pub struct NoteRecord {
    pub model_id: i64,
    pub fields: Vec<String>,
}
