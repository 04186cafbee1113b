//! Evidence strength and gating types.

use serde::{Deserialize, Serialize};

use super::collections::FxHashSet;
use super::report::AngleType;

/// The evidence factor categories the analyzer scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceFactorKind {
    Identification,
    Forensics,
    Witnesses,
    ProceduralCompliance,
    Medical,
    Disclosure,
}

impl EvidenceFactorKind {
    /// All factor kinds, in canonical order.
    pub fn all() -> &'static [EvidenceFactorKind] {
        &[
            Self::Identification,
            Self::Forensics,
            Self::Witnesses,
            Self::ProceduralCompliance,
            Self::Medical,
            Self::Disclosure,
        ]
    }

    /// Weight of this factor in the overall strength average.
    /// Identification and forensics are the most outcome-determinative.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Identification => 0.25,
            Self::Forensics => 0.25,
            Self::Witnesses => 0.15,
            Self::ProceduralCompliance => 0.15,
            Self::Medical => 0.10,
            Self::Disclosure => 0.10,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Identification => "identification",
            Self::Forensics => "forensics",
            Self::Witnesses => "witnesses",
            Self::ProceduralCompliance => "procedural_compliance",
            Self::Medical => "medical",
            Self::Disclosure => "disclosure",
        }
    }
}

impl std::fmt::Display for EvidenceFactorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Strength score for one evidence factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceFactor {
    pub kind: EvidenceFactorKind,
    /// Strength of the opposing case on this factor, [0,100].
    pub strength: u8,
    /// Human-readable labels of the indicators that matched.
    pub indicators: Vec<String>,
}

/// Five ordered strength buckets with fixed cut points:
/// [0,20) [20,40) [40,60) [60,80) [80,100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    /// Map an overall strength score to its bucket.
    pub fn from_strength(strength: u8) -> Self {
        match strength {
            0..=19 => Self::VeryWeak,
            20..=39 => Self::Weak,
            40..=59 => Self::Moderate,
            60..=79 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::VeryWeak => "very_weak",
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
            Self::VeryStrong => "very_strong",
        }
    }
}

impl std::fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How assertive the generated strategy language should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageTone {
    Assertive,
    Balanced,
    Cautious,
}

/// Directives the calibration engine applies to the raw angles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationDirectives {
    /// Angle types whose premise is undermined by the opposing evidence;
    /// these receive the stronger override damping.
    pub downgrade_types: FxHashSet<AngleType>,
    /// Replace aggressive stay/abuse-of-process framing in disclosure
    /// angles with softer procedural-directions framing.
    pub soften_disclosure_language: bool,
    /// Plain-language realistic outcome for the practitioner.
    pub realistic_outcome: String,
    pub tone: LanguageTone,
}

impl Default for CalibrationDirectives {
    fn default() -> Self {
        Self {
            downgrade_types: FxHashSet::default(),
            soften_disclosure_language: false,
            realistic_outcome: String::new(),
            tone: LanguageTone::Balanced,
        }
    }
}

/// Output of the evidence strength analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceStrengthResult {
    /// Weighted overall strength of the opposing case, [0,100].
    pub overall_strength: u8,
    pub level: StrengthLevel,
    /// Per-factor scores, in [`EvidenceFactorKind::all`] order.
    pub factors: Vec<EvidenceFactor>,
    pub directives: CalibrationDirectives,
    pub warnings: Vec<String>,
}

impl EvidenceStrengthResult {
    /// Look up one factor by kind.
    pub fn factor(&self, kind: EvidenceFactorKind) -> Option<&EvidenceFactor> {
        self.factors.iter().find(|f| f.kind == kind)
    }
}

/// Fraction of expected evidence categories present in the bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleCompleteness {
    /// Percentage of expected categories present, [0,100].
    pub percentage: u8,
    /// Categories flagged both critical and absent.
    pub critical_missing: u32,
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

/// Outcome of the probability visibility gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateDecision {
    /// Whether numeric confidence may be shown at all.
    pub show: bool,
    pub reason: Option<String>,
    pub banner: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_weights_sum_to_one() {
        let total: f64 = EvidenceFactorKind::all().iter().map(|k| k.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bucket_cut_points() {
        assert_eq!(StrengthLevel::from_strength(0), StrengthLevel::VeryWeak);
        assert_eq!(StrengthLevel::from_strength(19), StrengthLevel::VeryWeak);
        assert_eq!(StrengthLevel::from_strength(20), StrengthLevel::Weak);
        assert_eq!(StrengthLevel::from_strength(40), StrengthLevel::Moderate);
        assert_eq!(StrengthLevel::from_strength(60), StrengthLevel::Strong);
        assert_eq!(StrengthLevel::from_strength(79), StrengthLevel::Strong);
        assert_eq!(StrengthLevel::from_strength(80), StrengthLevel::VeryStrong);
        assert_eq!(StrengthLevel::from_strength(100), StrengthLevel::VeryStrong);
    }

    #[test]
    fn test_buckets_are_ordered() {
        assert!(StrengthLevel::VeryWeak < StrengthLevel::Weak);
        assert!(StrengthLevel::Strong < StrengthLevel::VeryStrong);
    }
}
