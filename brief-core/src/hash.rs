//! Content hashing for the document set.
//!
//! The external report cache keys on (tenant, case, content hash,
//! analysis name); the hash covers the ordered document texts and their
//! structured facts, so any change to the bundle supersedes prior cache
//! entries.

use xxhash_rust::xxh3::Xxh3;

use crate::types::case::Document;

/// xxh3 hash of the ordered document set. Length-prefixed per field so
/// that document boundaries cannot alias.
pub fn content_hash(documents: &[Document]) -> u64 {
    let mut hasher = Xxh3::new();
    for doc in documents {
        hasher.update(&(doc.raw_text.len() as u64).to_le_bytes());
        hasher.update(doc.raw_text.as_bytes());
        // Value serialization is deterministic for a given Value.
        let facts = doc.extracted_facts.to_string();
        hasher.update(&(facts.len() as u64).to_le_bytes());
        hasher.update(facts.as_bytes());
    }
    hasher.digest()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        let docs = vec![Document::from_text("interview transcript")];
        assert_eq!(content_hash(&docs), content_hash(&docs));
    }

    #[test]
    fn test_hash_sensitive_to_content_and_order() {
        let a = vec![Document::from_text("ab"), Document::from_text("c")];
        let b = vec![Document::from_text("a"), Document::from_text("bc")];
        let c = vec![Document::from_text("c"), Document::from_text("ab")];
        assert_ne!(content_hash(&a), content_hash(&b));
        assert_ne!(content_hash(&a), content_hash(&c));
    }

    #[test]
    fn test_hash_sensitive_to_facts() {
        let mut doc = Document::from_text("same text");
        let base = content_hash(std::slice::from_ref(&doc));
        doc.extracted_facts = serde_json::json!({"witness": "present"});
        assert_ne!(base, content_hash(std::slice::from_ref(&doc)));
    }
}
