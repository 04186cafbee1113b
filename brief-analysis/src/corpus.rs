//! Combined case corpus and multi-pattern matching.
//!
//! All presence/absence decisions run over ONE corpus: the concatenation
//! of every document's raw text and serialized structured facts, plus
//! the snapshot metadata. Matching is case-insensitive aho-corasick.

use aho_corasick::AhoCorasick;
use brief_core::types::case::CaseContext;
use brief_core::types::collections::FxHashSet;

/// The combined searchable text of one case.
#[derive(Debug, Clone)]
pub struct Corpus {
    text: String,
    pub document_count: usize,
    pub total_raw_chars: usize,
}

impl Corpus {
    /// Build from a case snapshot. `total_raw_chars` counts raw document
    /// text only; serialized facts are searchable but not counted.
    pub fn build(ctx: &CaseContext) -> Self {
        let mut text = String::new();
        let mut total_raw_chars = 0usize;
        for doc in &ctx.documents {
            total_raw_chars += doc.raw_text.chars().count();
            text.push_str(&doc.raw_text);
            text.push('\n');
            if !doc.extracted_facts.is_null() {
                text.push_str(&doc.extracted_facts.to_string());
                text.push('\n');
            }
        }
        if !ctx.metadata.is_null() {
            text.push_str(&ctx.metadata.to_string());
        }
        Self {
            text,
            document_count: ctx.documents.len(),
            total_raw_chars,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Average raw characters per document (0 when no documents).
    pub fn avg_chars_per_doc(&self) -> usize {
        if self.document_count == 0 {
            0
        } else {
            self.total_raw_chars / self.document_count
        }
    }
}

/// A compiled set of case-insensitive literal patterns.
pub struct PatternSet {
    ac: AhoCorasick,
}

impl PatternSet {
    /// Compile a pattern set. Pattern lists are static tables, so a
    /// build failure is a programming error.
    pub fn new(patterns: &[&str]) -> Self {
        let ac = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(patterns)
            .unwrap_or_else(|e| panic!("invalid pattern table: {e}"));
        Self { ac }
    }

    /// Whether any pattern occurs in the text.
    pub fn any_match(&self, text: &str) -> bool {
        self.ac.find(text).is_some()
    }

    /// Indexes of the patterns that occur at least once.
    pub fn matched_indexes(&self, text: &str) -> FxHashSet<usize> {
        let mut hits = FxHashSet::default();
        for m in self.ac.find_overlapping_iter(text) {
            hits.insert(m.pattern().as_usize());
        }
        hits
    }
}
