//! Case snapshot types supplied by the storage/extraction collaborators.
//!
//! A `CaseContext` is a read-only view of one matter: the extracted
//! documents plus whatever structured metadata the upstream extraction
//! layer produced. The engine never mutates it and never fetches more.

use serde::{Deserialize, Serialize};

/// A single extracted document: raw OCR/text output plus the structured
/// facts the extraction layer pulled from it (loosely typed JSON — see
/// `types::facts` for the validated form).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub raw_text: String,
    #[serde(default)]
    pub extracted_facts: serde_json::Value,
}

impl Document {
    /// Convenience constructor for a text-only document.
    pub fn from_text(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            extracted_facts: serde_json::Value::Null,
        }
    }
}

/// The practice areas the engine ships rule sets for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PracticeArea {
    Criminal,
    Civil,
    Family,
    #[default]
    General,
}

impl PracticeArea {
    /// All supported practice areas.
    pub fn all() -> &'static [PracticeArea] {
        &[Self::Criminal, Self::Civil, Self::Family, Self::General]
    }

    /// Area name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Criminal => "criminal",
            Self::Civil => "civil",
            Self::Family => "family",
            Self::General => "general",
        }
    }

    /// Parse from string.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "criminal" => Some(Self::Criminal),
            "civil" => Some(Self::Civil),
            "family" => Some(Self::Family),
            "general" => Some(Self::General),
            _ => None,
        }
    }
}

impl std::fmt::Display for PracticeArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable snapshot of one case as supplied by the collaborator layer.
///
/// `metadata` carries the charge/evidence/compliance/disclosure record in
/// the upstream's loosely-typed JSON form; it is validated exactly once
/// into a [`crate::types::facts::CaseFacts`] at the engine boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseContext {
    pub documents: Vec<Document>,
    #[serde(default)]
    pub practice_area: PracticeArea,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl CaseContext {
    pub fn new(documents: Vec<Document>, practice_area: PracticeArea) -> Self {
        Self {
            documents,
            practice_area,
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Total raw characters across all documents.
    pub fn total_raw_chars(&self) -> usize {
        self.documents.iter().map(|d| d.raw_text.chars().count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_practice_area_roundtrip() {
        for area in PracticeArea::all() {
            assert_eq!(PracticeArea::parse_str(area.name()), Some(*area));
        }
        assert_eq!(PracticeArea::parse_str("maritime"), None);
    }

    #[test]
    fn test_total_raw_chars() {
        let ctx = CaseContext::new(
            vec![Document::from_text("abcde"), Document::from_text("xyz")],
            PracticeArea::Criminal,
        );
        assert_eq!(ctx.total_raw_chars(), 8);
    }
}
