//! Strategy report types — the universal output of the assessment engine.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::evidence::LanguageTone;

/// How severe (case-determinative) an angle is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Rank for ordering and weighting. Higher is more severe.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed enum of angle types, grouped by the practice area whose rule
/// set emits them. The two `General` variants are the guaranteed
/// fallback set and may appear for any area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleType {
    // Criminal
    UnlawfulDetention,
    InterviewBreach,
    IdentificationWeakness,
    DisclosureFailure,
    ChainOfCustody,
    ForensicChallenge,
    WitnessCredibility,
    // Civil
    LimitationDefence,
    DirectionsNonCompliance,
    ExpertEvidenceChallenge,
    QuantumDispute,
    // Family
    WelfareReportChallenge,
    FinancialDisclosureFailure,
    // General (fallback — any area)
    EvidentialSufficiency,
    NegotiatedResolution,
}

impl AngleType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UnlawfulDetention => "unlawful_detention",
            Self::InterviewBreach => "interview_breach",
            Self::IdentificationWeakness => "identification_weakness",
            Self::DisclosureFailure => "disclosure_failure",
            Self::ChainOfCustody => "chain_of_custody",
            Self::ForensicChallenge => "forensic_challenge",
            Self::WitnessCredibility => "witness_credibility",
            Self::LimitationDefence => "limitation_defence",
            Self::DirectionsNonCompliance => "directions_non_compliance",
            Self::ExpertEvidenceChallenge => "expert_evidence_challenge",
            Self::QuantumDispute => "quantum_dispute",
            Self::WelfareReportChallenge => "welfare_report_challenge",
            Self::FinancialDisclosureFailure => "financial_disclosure_failure",
            Self::EvidentialSufficiency => "evidential_sufficiency",
            Self::NegotiatedResolution => "negotiated_resolution",
        }
    }
}

impl std::fmt::Display for AngleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A candidate procedural or substantive strategic argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseAngle {
    pub id: String,
    pub angle_type: AngleType,
    pub severity: Severity,
    /// Estimated probability of success in [0,100]. `None` only after
    /// the visibility gate has suppressed numeric confidence.
    pub win_probability: Option<u8>,
    pub title: String,
    pub why_it_matters: String,
    pub legal_basis: String,
    pub opposing_weakness: String,
    pub exploitation: String,
    pub arguments: Vec<String>,
    pub questions: Vec<String>,
    pub required_evidence: Vec<String>,
    /// Angle types this angle legitimately combines with in a compound
    /// strategy.
    pub combines_with: SmallVec<[AngleType; 4]>,
}

/// The single recommended, combined strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedStrategy {
    pub primary_angle: DefenseAngle,
    pub supporting_angles: Vec<DefenseAngle>,
    pub combined_probability: Option<u8>,
    pub tactical_plan: Vec<String>,
}

/// Stable reason codes echoed in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    NoDocs,
    TextThin,
    SuspectedScanned,
    LowCompleteness,
    CriticalEvidenceMissing,
}

impl ReasonCode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoDocs => "NO_DOCS",
            Self::TextThin => "TEXT_THIN",
            Self::SuspectedScanned => "SUSPECTED_SCANNED",
            Self::LowCompleteness => "LOW_COMPLETENESS",
            Self::CriticalEvidenceMissing => "CRITICAL_EVIDENCE_MISSING",
        }
    }
}

/// Diagnostic counters echoing the gates' findings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    pub document_count: usize,
    pub total_raw_chars: usize,
    pub reason_codes: Vec<ReasonCode>,
}

/// The full assessment output for one case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyReport {
    pub overall_win_probability: Option<u8>,
    pub all_angles: Vec<DefenseAngle>,
    pub critical_angles: Vec<DefenseAngle>,
    pub recommended_strategy: RecommendedStrategy,
    /// Plain-language realistic outcome derived from the opposing
    /// evidence strength. Survives probability suppression.
    pub realistic_outcome: String,
    /// How assertively the strategy language is pitched.
    pub tone: LanguageTone,
    pub probabilities_suppressed: bool,
    pub suppression_reason: Option<String>,
    pub warnings: Vec<String>,
    pub diagnostics: Diagnostics,
    /// Generation timestamp (unix ms), supplied by the caller. The only
    /// field allowed to differ between two runs on identical input.
    pub generated_at: u64,
}

/// Clamp an arbitrary score to [0,100], mapping NaN to 0.
pub fn clamp_probability(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
