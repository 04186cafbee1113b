//! Bundle completeness assessor.
//!
//! Per practice area, an enumerated set of critical evidence categories
//! is matched (case-insensitively) against the combined corpus — not per
//! document. The output feeds the probability visibility gate and,
//! indirectly, the calibration directives.

use brief_core::types::case::PracticeArea;
use brief_core::types::evidence::BundleCompleteness;

use crate::corpus::{Corpus, PatternSet};

/// One expected evidence category and the phrases that evidence it.
struct CategoryDef {
    name: &'static str,
    critical: bool,
    patterns: &'static [&'static str],
}

const CRIMINAL_CATEGORIES: &[CategoryDef] = &[
    CategoryDef {
        name: "custody record",
        critical: true,
        patterns: &["custody record", "custody log", "detention log", "custody suite"],
    },
    CategoryDef {
        name: "interview recording",
        critical: true,
        patterns: &[
            "interview transcript",
            "interview recording",
            "record of interview",
            "taped interview",
        ],
    },
    CategoryDef {
        name: "legal advice log",
        critical: false,
        patterns: &["legal advice", "solicitor consultation", "legal visit"],
    },
    CategoryDef {
        name: "caution record",
        critical: false,
        patterns: &["caution administered", "was cautioned", "rights read", "caution given"],
    },
    CategoryDef {
        name: "charge sheet",
        critical: true,
        patterns: &["charge sheet", "charging decision", "charged with"],
    },
    CategoryDef {
        name: "identification evidence",
        critical: true,
        patterns: &[
            "identification procedure",
            "identification parade",
            "video identification",
            "cctv",
            "eyewitness",
        ],
    },
    CategoryDef {
        name: "disclosure schedule",
        critical: true,
        patterns: &["disclosure schedule", "schedule of unused", "unused material"],
    },
];

const CIVIL_CATEGORIES: &[CategoryDef] = &[
    CategoryDef {
        name: "claim form",
        critical: true,
        patterns: &["claim form", "claim no", "claim number"],
    },
    CategoryDef {
        name: "particulars of claim",
        critical: true,
        patterns: &["particulars of claim"],
    },
    CategoryDef {
        name: "defence statement",
        critical: false,
        patterns: &["defence statement", "statement of defence", "amended defence"],
    },
    CategoryDef {
        name: "witness statements",
        critical: false,
        patterns: &["witness statement", "statement of truth"],
    },
    CategoryDef {
        name: "expert report",
        critical: false,
        patterns: &["expert report", "expert opinion", "jointly instructed expert"],
    },
    CategoryDef {
        name: "disclosure list",
        critical: true,
        patterns: &["disclosure list", "list of documents", "standard disclosure"],
    },
];

const FAMILY_CATEGORIES: &[CategoryDef] = &[
    CategoryDef {
        name: "application form",
        critical: true,
        patterns: &["application form", "form c100", "form a "],
    },
    CategoryDef {
        name: "welfare report",
        critical: false,
        patterns: &["welfare report", "cafcass", "section 7 report"],
    },
    CategoryDef {
        name: "financial disclosure",
        critical: true,
        patterns: &["form e", "financial disclosure", "financial statement"],
    },
    CategoryDef {
        name: "safeguarding letter",
        critical: false,
        patterns: &["safeguarding letter", "safeguarding checks"],
    },
    CategoryDef {
        name: "position statement",
        critical: false,
        patterns: &["position statement"],
    },
];

const GENERAL_CATEGORIES: &[CategoryDef] = &[
    CategoryDef {
        name: "primary documents",
        critical: true,
        patterns: &["agreement", "contract", "deed", "invoice"],
    },
    CategoryDef {
        name: "witness statements",
        critical: true,
        patterns: &["witness statement", "statement of truth"],
    },
    CategoryDef {
        name: "correspondence",
        critical: false,
        patterns: &["dear sir", "dear madam", "letter before", "re:"],
    },
    CategoryDef {
        name: "chronology",
        critical: false,
        patterns: &["chronology", "timeline of events"],
    },
];

fn categories_for(area: PracticeArea) -> &'static [CategoryDef] {
    match area {
        PracticeArea::Criminal => CRIMINAL_CATEGORIES,
        PracticeArea::Civil => CIVIL_CATEGORIES,
        PracticeArea::Family => FAMILY_CATEGORIES,
        PracticeArea::General => GENERAL_CATEGORIES,
    }
}

/// Assess what fraction of the expected categories the bundle contains.
pub fn assess(corpus: &Corpus, area: PracticeArea) -> BundleCompleteness {
    let categories = categories_for(area);

    // One automaton over every pattern, mapped back to its category.
    let mut patterns: Vec<&str> = Vec::new();
    let mut owner: Vec<usize> = Vec::new();
    for (cat_idx, cat) in categories.iter().enumerate() {
        for p in cat.patterns {
            patterns.push(p);
            owner.push(cat_idx);
        }
    }
    let set = PatternSet::new(&patterns);
    let hits = set.matched_indexes(corpus.text());

    let mut present_flags = vec![false; categories.len()];
    for idx in hits {
        present_flags[owner[idx]] = true;
    }

    let mut present = Vec::new();
    let mut missing = Vec::new();
    let mut critical_missing = 0u32;
    for (cat, found) in categories.iter().zip(&present_flags) {
        if *found {
            present.push(cat.name.to_string());
        } else {
            missing.push(cat.name.to_string());
            if cat.critical {
                critical_missing += 1;
            }
        }
    }

    let percentage = if categories.is_empty() {
        100
    } else {
        ((present.len() as f64 / categories.len() as f64) * 100.0).round() as u8
    };

    BundleCompleteness {
        percentage,
        critical_missing,
        present,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_core::types::case::{CaseContext, Document};

    fn corpus(text: &str, area: PracticeArea) -> Corpus {
        Corpus::build(&CaseContext::new(vec![Document::from_text(text)], area))
    }

    #[test]
    fn test_empty_corpus_is_fully_incomplete() {
        let result = assess(&corpus("", PracticeArea::Criminal), PracticeArea::Criminal);
        assert_eq!(result.percentage, 0);
        assert_eq!(result.critical_missing, 5);
        assert_eq!(result.missing.len(), 7);
    }

    #[test]
    fn test_full_criminal_bundle() {
        let text = "Custody record enclosed. Interview transcript attached. Legal advice \
                    given at 14:02. Suspect was cautioned. Charge sheet follows. CCTV and \
                    identification parade held. Disclosure schedule of unused material served.";
        let result = assess(&corpus(text, PracticeArea::Criminal), PracticeArea::Criminal);
        assert_eq!(result.percentage, 100);
        assert_eq!(result.critical_missing, 0);
    }

    #[test]
    fn test_partial_bundle_counts_critical_missing() {
        // Charge sheet + CCTV present; custody record, interview, disclosure absent.
        let text = "The defendant was charged with burglary, see charge sheet. CCTV stills.";
        let result = assess(&corpus(text, PracticeArea::Criminal), PracticeArea::Criminal);
        assert!(result.percentage > 0 && result.percentage < 100);
        assert_eq!(result.critical_missing, 3);
        assert!(result.missing.iter().any(|m| m == "custody record"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let result = assess(
            &corpus("FORM E SERVED; CAFCASS REPORT PENDING", PracticeArea::Family),
            PracticeArea::Family,
        );
        assert!(result.present.iter().any(|p| p == "financial disclosure"));
        assert!(result.present.iter().any(|p| p == "welfare report"));
    }
}
