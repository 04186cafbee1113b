//! Indicator tables for corpus-scanned evidence factors.
//!
//! Each indicator contributes a fixed point weight to its factor's
//! 0-100 score when any of its phrases occurs in the combined corpus.
//! Factor scores are capped at 100.

use brief_core::types::evidence::{EvidenceFactor, EvidenceFactorKind};

use crate::corpus::{Corpus, PatternSet};

/// One scored indicator within a factor.
pub struct Indicator {
    pub label: &'static str,
    pub weight: u8,
    pub patterns: &'static [&'static str],
}

pub const IDENTIFICATION: &[Indicator] = &[
    Indicator {
        label: "CCTV footage",
        weight: 30,
        patterns: &["cctv", "camera footage", "video footage", "dashcam"],
    },
    Indicator {
        label: "eyewitness identification",
        weight: 25,
        patterns: &["eyewitness", "witness identified", "identified the defendant"],
    },
    Indicator {
        label: "facial recognition",
        weight: 20,
        patterns: &["facial recognition"],
    },
    Indicator {
        label: "formal identification procedure",
        weight: 25,
        patterns: &[
            "identification parade",
            "video identification",
            "identification procedure",
            "viper",
        ],
    },
];

pub const FORENSICS: &[Indicator] = &[
    Indicator {
        label: "DNA evidence",
        weight: 35,
        patterns: &["dna match", "dna profile", "dna evidence"],
    },
    Indicator {
        label: "fingerprint evidence",
        weight: 30,
        patterns: &["fingerprint", "finger mark"],
    },
    Indicator {
        label: "forensic report",
        weight: 20,
        patterns: &["forensic report", "forensic analysis", "forensic examination"],
    },
    Indicator {
        label: "digital forensics",
        weight: 15,
        patterns: &["phone download", "cell site", "digital forensics", "device examination"],
    },
];

pub const WITNESSES: &[Indicator] = &[
    Indicator {
        label: "multiple witnesses",
        weight: 30,
        patterns: &["witnesses state", "both witnesses", "several witnesses", "three witnesses"],
    },
    Indicator {
        label: "consistent accounts",
        weight: 25,
        patterns: &["consistent account", "accounts are consistent", "corroborate"],
    },
    Indicator {
        label: "independent witness",
        weight: 25,
        patterns: &["independent witness", "passer-by", "bystander"],
    },
    Indicator {
        label: "expert witness",
        weight: 20,
        patterns: &["expert witness", "expert report", "expert opinion"],
    },
];

pub const MEDICAL: &[Indicator] = &[
    Indicator {
        label: "medical report",
        weight: 40,
        patterns: &["medical report", "medical examination", "a&e record", "hospital record"],
    },
    Indicator {
        label: "documented injuries",
        weight: 30,
        patterns: &["injuries documented", "bruising", "laceration", "fracture"],
    },
    Indicator {
        label: "photographic evidence of injury",
        weight: 30,
        patterns: &["photographs of injuries", "injury photographs", "body map"],
    },
];

/// Procedural-compliance corpus fallback, used only when no structured
/// compliance record was supplied.
pub const PROCEDURAL_FALLBACK: &[Indicator] = &[
    Indicator {
        label: "solicitor present",
        weight: 35,
        patterns: &["solicitor was present", "solicitor present", "attended by solicitor"],
    },
    Indicator {
        label: "recorded interview",
        weight: 35,
        patterns: &["interview was recorded", "recorded interview", "audibly recorded"],
    },
    Indicator {
        label: "rights given",
        weight: 30,
        patterns: &["rights were given", "advised of his rights", "advised of her rights", "was cautioned"],
    },
];

/// Score one corpus-scanned factor: sum the weights of the indicators
/// whose phrases occur, capped at 100.
pub fn score_corpus_factor(
    kind: EvidenceFactorKind,
    table: &[Indicator],
    corpus: &Corpus,
) -> EvidenceFactor {
    let mut patterns: Vec<&str> = Vec::new();
    let mut owner: Vec<usize> = Vec::new();
    for (idx, indicator) in table.iter().enumerate() {
        for p in indicator.patterns {
            patterns.push(p);
            owner.push(idx);
        }
    }
    let set = PatternSet::new(&patterns);
    let hits = set.matched_indexes(corpus.text());

    let mut fired = vec![false; table.len()];
    for hit in hits {
        fired[owner[hit]] = true;
    }

    let mut score = 0u32;
    let mut labels = Vec::new();
    for (indicator, hit) in table.iter().zip(&fired) {
        if *hit {
            score += indicator.weight as u32;
            labels.push(indicator.label.to_string());
        }
    }

    EvidenceFactor {
        kind,
        strength: score.min(100) as u8,
        indicators: labels,
    }
}
