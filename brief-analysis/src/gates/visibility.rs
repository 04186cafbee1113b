//! Probability visibility gate.
//!
//! Pure function of (practice area, completeness, critical-missing):
//! when the bundle is too thin to support trustworthy numbers, every
//! numeric probability in the outgoing report is nulled while the
//! qualitative content is preserved. A hard safety gate against false
//! confidence.

use brief_core::config::thresholds::Thresholds;
use brief_core::types::case::PracticeArea;
use brief_core::types::evidence::{BundleCompleteness, GateDecision};
use brief_core::types::report::ReasonCode;

/// Decide whether numeric confidence may be shown.
pub fn decide(
    area: PracticeArea,
    completeness: &BundleCompleteness,
    thresholds: &Thresholds,
) -> (GateDecision, Vec<ReasonCode>) {
    let min_completeness = thresholds.min_completeness(area);
    let mut codes = Vec::new();

    if completeness.percentage < min_completeness {
        codes.push(ReasonCode::LowCompleteness);
    }
    if completeness.critical_missing >= thresholds.max_critical_missing {
        codes.push(ReasonCode::CriticalEvidenceMissing);
    }

    if codes.is_empty() {
        return (
            GateDecision {
                show: true,
                reason: None,
                banner: None,
            },
            codes,
        );
    }

    let reason = format!(
        "Evidence bundle is {}% complete ({} critical categories missing); the {} practice \
         area requires at least {}% with fewer than {} critical gaps before numeric \
         confidence is shown.",
        completeness.percentage,
        completeness.critical_missing,
        area,
        min_completeness,
        thresholds.max_critical_missing
    );
    (
        GateDecision {
            show: false,
            banner: Some(
                "Confidence scores are hidden because the evidence bundle is incomplete. \
                 The strategic analysis below remains available."
                    .to_string(),
            ),
            reason: Some(reason),
        },
        codes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completeness(percentage: u8, critical_missing: u32) -> BundleCompleteness {
        BundleCompleteness {
            percentage,
            critical_missing,
            present: Vec::new(),
            missing: Vec::new(),
        }
    }

    #[test]
    fn test_complete_bundle_shows() {
        let (decision, codes) = decide(
            PracticeArea::Criminal,
            &completeness(85, 0),
            &Thresholds::default(),
        );
        assert!(decision.show);
        assert!(decision.reason.is_none());
        assert!(codes.is_empty());
    }

    #[test]
    fn test_low_completeness_suppresses() {
        let (decision, codes) = decide(
            PracticeArea::Criminal,
            &completeness(40, 3),
            &Thresholds::default(),
        );
        assert!(!decision.show);
        assert!(decision.reason.is_some());
        assert_eq!(
            codes,
            vec![ReasonCode::LowCompleteness, ReasonCode::CriticalEvidenceMissing]
        );
    }

    #[test]
    fn test_critical_missing_alone_suppresses() {
        let (decision, codes) = decide(
            PracticeArea::Civil,
            &completeness(80, 2),
            &Thresholds::default(),
        );
        assert!(!decision.show);
        assert_eq!(codes, vec![ReasonCode::CriticalEvidenceMissing]);
    }

    #[test]
    fn test_thresholds_differ_per_area() {
        // 45% passes general (min 40) but fails criminal (min 60).
        let bundle = completeness(45, 0);
        let thresholds = Thresholds::default();
        assert!(decide(PracticeArea::General, &bundle, &thresholds).0.show);
        assert!(!decide(PracticeArea::Criminal, &bundle, &thresholds).0.show);
    }

    #[test]
    fn test_gate_is_deterministic() {
        let bundle = completeness(59, 1);
        let thresholds = Thresholds::default();
        let first = decide(PracticeArea::Criminal, &bundle, &thresholds);
        for _ in 0..10 {
            let next = decide(PracticeArea::Criminal, &bundle, &thresholds);
            assert_eq!(first.0.show, next.0.show);
            assert_eq!(first.0.reason, next.0.reason);
            assert_eq!(first.1, next.1);
        }
    }
}
