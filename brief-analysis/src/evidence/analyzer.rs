//! Evidence strength analyzer.
//!
//! Scores the opposing case's evidentiary strength per factor and
//! overall, and derives the calibration directives the downstream
//! engine applies to the raw angles.

use brief_core::types::evidence::{
    CalibrationDirectives, EvidenceFactor, EvidenceFactorKind, EvidenceStrengthResult,
    LanguageTone, StrengthLevel,
};
use brief_core::types::facts::{CaseFacts, ComplianceRecord, GapSeverity};
use brief_core::types::report::{clamp_probability, AngleType};

use crate::corpus::Corpus;

use super::indicators;

/// Factor score at or above which a compliance-dependent angle premise
/// is considered undermined.
const FACTOR_COMPLIANT: u8 = 70;
/// Disclosure factor score at or above which the record is considered
/// clean enough to soften disclosure-failure framing.
const DISCLOSURE_CLEAN: u8 = 80;

/// Points deducted from the disclosure factor per gap severity.
const GAP_PENALTY_MINOR: u32 = 10;
const GAP_PENALTY_MATERIAL: u32 = 25;
const GAP_PENALTY_FOUNDATIONAL: u32 = 40;

#[derive(Default)]
pub struct EvidenceAnalyzer;

impl EvidenceAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze the combined corpus and validated facts.
    pub fn analyze(&self, corpus: &Corpus, facts: &CaseFacts) -> EvidenceStrengthResult {
        let factors = vec![
            indicators::score_corpus_factor(
                EvidenceFactorKind::Identification,
                indicators::IDENTIFICATION,
                corpus,
            ),
            indicators::score_corpus_factor(
                EvidenceFactorKind::Forensics,
                indicators::FORENSICS,
                corpus,
            ),
            indicators::score_corpus_factor(
                EvidenceFactorKind::Witnesses,
                indicators::WITNESSES,
                corpus,
            ),
            score_procedural(&facts.compliance(), corpus),
            indicators::score_corpus_factor(
                EvidenceFactorKind::Medical,
                indicators::MEDICAL,
                corpus,
            ),
            score_disclosure(facts),
        ];

        let weighted: f64 = factors
            .iter()
            .map(|f| f.strength as f64 * f.kind.weight())
            .sum();
        let overall_strength = clamp_probability(weighted);
        let level = StrengthLevel::from_strength(overall_strength);

        let directives = self.derive_directives(&factors, level);
        let warnings = derive_warnings(&factors, overall_strength, level);

        tracing::debug!(
            overall_strength,
            level = %level,
            downgrades = directives.downgrade_types.len(),
            "evidence strength analyzed"
        );

        EvidenceStrengthResult {
            overall_strength,
            level,
            factors,
            directives,
            warnings,
        }
    }

    fn derive_directives(
        &self,
        factors: &[EvidenceFactor],
        level: StrengthLevel,
    ) -> CalibrationDirectives {
        let mut directives = CalibrationDirectives {
            tone: match level {
                StrengthLevel::VeryStrong | StrengthLevel::Strong => LanguageTone::Cautious,
                StrengthLevel::Moderate => LanguageTone::Balanced,
                _ => LanguageTone::Assertive,
            },
            realistic_outcome: realistic_outcome(level).to_string(),
            ..Default::default()
        };

        let strength_of = |kind: EvidenceFactorKind| {
            factors
                .iter()
                .find(|f| f.kind == kind)
                .map(|f| f.strength)
                .unwrap_or(0)
        };

        if strength_of(EvidenceFactorKind::ProceduralCompliance) >= FACTOR_COMPLIANT {
            directives.downgrade_types.insert(AngleType::UnlawfulDetention);
            directives.downgrade_types.insert(AngleType::InterviewBreach);
        }
        if strength_of(EvidenceFactorKind::Disclosure) >= DISCLOSURE_CLEAN {
            directives.downgrade_types.insert(AngleType::DisclosureFailure);
            directives
                .downgrade_types
                .insert(AngleType::FinancialDisclosureFailure);
            directives.soften_disclosure_language = true;
        }
        if strength_of(EvidenceFactorKind::Identification) >= FACTOR_COMPLIANT {
            directives
                .downgrade_types
                .insert(AngleType::IdentificationWeakness);
        }
        if strength_of(EvidenceFactorKind::Forensics) >= FACTOR_COMPLIANT {
            directives.downgrade_types.insert(AngleType::ForensicChallenge);
            directives.downgrade_types.insert(AngleType::ChainOfCustody);
        }

        directives
    }
}

fn score_procedural(compliance: &ComplianceRecord, corpus: &Corpus) -> EvidenceFactor {
    let unknown = compliance.solicitor_present.is_none()
        && compliance.interview_recorded.is_none()
        && compliance.rights_given.is_none()
        && compliance.caution_given.is_none()
        && compliance.custody_log_complete.is_none();
    if unknown {
        // No structured record: fall back to corpus phrases.
        return indicators::score_corpus_factor(
            EvidenceFactorKind::ProceduralCompliance,
            indicators::PROCEDURAL_FALLBACK,
            corpus,
        );
    }

    let mut score = 0u32;
    let mut labels = Vec::new();
    let mut add = |flag: Option<bool>, weight: u32, label: &str| {
        if flag == Some(true) {
            score += weight;
            labels.push(label.to_string());
        }
    };
    add(compliance.solicitor_present, 30, "solicitor present");
    add(compliance.interview_recorded, 30, "interview recorded");
    add(compliance.rights_given, 20, "rights given");
    add(compliance.caution_given, 10, "caution administered");
    add(compliance.custody_log_complete, 10, "custody log complete");

    EvidenceFactor {
        kind: EvidenceFactorKind::ProceduralCompliance,
        strength: score.min(100) as u8,
        indicators: labels,
    }
}

fn score_disclosure(facts: &CaseFacts) -> EvidenceFactor {
    let gaps = facts.disclosure_gaps();
    if gaps.is_empty() {
        return EvidenceFactor {
            kind: EvidenceFactorKind::Disclosure,
            strength: 100,
            indicators: vec!["no disclosure gaps recorded".to_string()],
        };
    }

    let mut penalty = 0u32;
    let mut labels = Vec::new();
    for gap in gaps {
        let (points, tag) = match gap.severity {
            GapSeverity::Minor => (GAP_PENALTY_MINOR, "minor"),
            GapSeverity::Material => (GAP_PENALTY_MATERIAL, "material"),
            GapSeverity::Foundational => (GAP_PENALTY_FOUNDATIONAL, "foundational"),
        };
        penalty += points;
        labels.push(format!("{} gap: {}", tag, gap.item));
    }

    EvidenceFactor {
        kind: EvidenceFactorKind::Disclosure,
        strength: 100u32.saturating_sub(penalty).min(100) as u8,
        indicators: labels,
    }
}

fn realistic_outcome(level: StrengthLevel) -> &'static str {
    match level {
        StrengthLevel::VeryStrong => {
            "The opposing evidence is very strong. Absent a successful procedural challenge, \
             focus on mitigation, charge negotiation, and early resolution."
        }
        StrengthLevel::Strong => {
            "The opposing evidence is strong. Procedural angles may narrow the case, but a \
             realistic outcome assessment should anchor the strategy."
        }
        StrengthLevel::Moderate => {
            "The opposing evidence is contestable. A combined procedural and substantive \
             challenge is viable."
        }
        StrengthLevel::Weak => {
            "The opposing evidence is weak. Evidential sufficiency should be pressed at the \
             earliest opportunity."
        }
        StrengthLevel::VeryWeak => {
            "The opposing evidence is very weak. Consider an application to dismiss or an \
             early submission of no case to answer."
        }
    }
}

fn derive_warnings(
    factors: &[EvidenceFactor],
    overall_strength: u8,
    level: StrengthLevel,
) -> Vec<String> {
    let mut warnings = Vec::new();
    if level >= StrengthLevel::Strong {
        warnings.push(format!(
            "The opposing case scores {overall_strength}/100 ({level}); speculative strategies \
             should be treated with caution."
        ));
    }
    for factor in factors {
        if factor.kind == EvidenceFactorKind::Identification && factor.strength >= FACTOR_COMPLIANT
        {
            warnings.push(
                "Identification evidence is well supported; an identification challenge alone \
                 is unlikely to succeed."
                    .to_string(),
            );
        }
        if factor.kind == EvidenceFactorKind::Forensics && factor.strength >= FACTOR_COMPLIANT {
            warnings.push(
                "Forensic evidence is well supported; methodology challenges need expert input."
                    .to_string(),
            );
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_core::types::case::{CaseContext, Document, PracticeArea};
    use brief_core::types::facts::{CriminalFacts, DisclosureGap};

    fn corpus(text: &str) -> Corpus {
        Corpus::build(&CaseContext::new(
            vec![Document::from_text(text)],
            PracticeArea::Criminal,
        ))
    }

    fn criminal_facts(compliance: ComplianceRecord, gaps: Vec<DisclosureGap>) -> CaseFacts {
        CaseFacts::Criminal(CriminalFacts {
            charge: None,
            compliance,
            evidence_items: Vec::new(),
            disclosure_gaps: gaps,
        })
    }

    fn gap(severity: GapSeverity) -> DisclosureGap {
        DisclosureGap {
            item: "item".to_string(),
            severity,
            days_overdue: None,
        }
    }

    #[test]
    fn test_overall_strength_in_range() {
        let analyzer = EvidenceAnalyzer::new();
        let result = analyzer.analyze(
            &corpus("cctv dna match fingerprint eyewitness medical report"),
            &criminal_facts(ComplianceRecord::default(), Vec::new()),
        );
        assert!(result.overall_strength <= 100);
        assert_eq!(result.factors.len(), 6);
        assert_eq!(result.level, StrengthLevel::from_strength(result.overall_strength));
    }

    #[test]
    fn test_disclosure_penalties() {
        let facts = criminal_facts(
            ComplianceRecord::default(),
            vec![gap(GapSeverity::Minor), gap(GapSeverity::Foundational)],
        );
        let factor = score_disclosure(&facts);
        assert_eq!(factor.strength, 50);
        assert_eq!(factor.indicators.len(), 2);
    }

    #[test]
    fn test_clean_record_fires_both_downgrade_directives() {
        let analyzer = EvidenceAnalyzer::new();
        let compliance = ComplianceRecord {
            solicitor_present: Some(true),
            interview_recorded: Some(true),
            rights_given: Some(true),
            caution_given: Some(true),
            custody_log_complete: Some(true),
            detention_hours: Some(8),
        };
        let result = analyzer.analyze(
            &corpus("routine case papers"),
            &criminal_facts(compliance, Vec::new()),
        );
        assert!(result.directives.downgrade_types.contains(&AngleType::InterviewBreach));
        assert!(result.directives.downgrade_types.contains(&AngleType::UnlawfulDetention));
        assert!(result.directives.downgrade_types.contains(&AngleType::DisclosureFailure));
        assert!(result.directives.soften_disclosure_language);
    }

    #[test]
    fn test_procedural_fallback_to_corpus() {
        let factor = score_procedural(
            &ComplianceRecord::default(),
            &corpus("the interview was recorded and a solicitor was present"),
        );
        assert_eq!(factor.strength, 70);
    }

    #[test]
    fn test_strong_case_emits_warning() {
        let analyzer = EvidenceAnalyzer::new();
        let result = analyzer.analyze(
            &corpus(
                "cctv eyewitness identification parade facial recognition dna match \
                 fingerprint forensic report phone download independent witness \
                 consistent account expert witness medical report bruising",
            ),
            &criminal_facts(ComplianceRecord::default(), Vec::new()),
        );
        assert!(result.level >= StrengthLevel::Strong);
        assert!(!result.warnings.is_empty());
        assert_eq!(result.directives.tone, LanguageTone::Cautious);
    }
}
