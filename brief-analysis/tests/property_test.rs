//! Property tests over arbitrary case bundles.

use brief_analysis::pipeline::{AssessmentOutcome, AssessmentPipeline};
use brief_core::types::case::{CaseContext, Document, PracticeArea};
use proptest::prelude::*;

/// Phrases drawn from the evidence vocabulary, mixed with filler, so
/// generated bundles exercise the pattern tables and not just the
/// empty-corpus path.
fn document_text() -> impl Strategy<Value = String> {
    let phrase = prop_oneof![
        Just("custody record"),
        Just("interview transcript"),
        Just("charge sheet"),
        Just("cctv"),
        Just("eyewitness"),
        Just("dna match"),
        Just("fingerprint"),
        Just("disclosure schedule of unused material"),
        Just("witness statement"),
        Just("claim form"),
        Just("particulars of claim"),
        Just("list of documents"),
        Just("form e"),
        Just("cafcass"),
        Just("the client disputes the account given"),
        Just("no further material has been served"),
    ];
    prop::collection::vec(phrase, 0..12)
        .prop_map(|phrases| phrases.join(". "))
}

fn practice_area() -> impl Strategy<Value = PracticeArea> {
    prop_oneof![
        Just(PracticeArea::Criminal),
        Just(PracticeArea::Civil),
        Just(PracticeArea::Family),
        Just(PracticeArea::General),
    ]
}

fn case_context() -> impl Strategy<Value = CaseContext> {
    (prop::collection::vec(document_text(), 0..6), practice_area())
        .prop_map(|(texts, area)| {
            let docs = texts.into_iter().map(Document::from_text).collect();
            CaseContext::new(docs, area)
        })
}

proptest! {
    #[test]
    fn prop_assessment_never_panics(ctx in case_context()) {
        let _ = AssessmentPipeline::new().assess(&ctx, 0);
    }

    #[test]
    fn prop_assessment_is_deterministic(ctx in case_context()) {
        let pipeline = AssessmentPipeline::new();
        let first = pipeline.assess(&ctx, 7);
        let second = pipeline.assess(&ctx, 7);
        match (&first, &second) {
            (AssessmentOutcome::Report(a), AssessmentOutcome::Report(b)) => {
                prop_assert_eq!(
                    serde_json::to_string(a).unwrap(),
                    serde_json::to_string(b).unwrap()
                );
            }
            (
                AssessmentOutcome::InsufficientText { code: a, .. },
                AssessmentOutcome::InsufficientText { code: b, .. },
            ) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "outcome variant differed between runs"),
        }
    }

    #[test]
    fn prop_reports_are_ranked_and_bounded(ctx in case_context()) {
        if let AssessmentOutcome::Report(report) = AssessmentPipeline::new().assess(&ctx, 0) {
            for pair in report.all_angles.windows(2) {
                prop_assert!(pair[0].win_probability >= pair[1].win_probability);
            }
            for angle in &report.all_angles {
                if let Some(p) = angle.win_probability {
                    prop_assert!(p <= 100);
                }
            }
            if let Some(overall) = report.overall_win_probability {
                prop_assert!(overall <= 100);
            }
            prop_assert!(report.critical_angles.len() <= 5);
            prop_assert!(report.recommended_strategy.supporting_angles.len() <= 3);
            prop_assert!(!report.all_angles.is_empty());
        }
    }

    #[test]
    fn prop_suppression_is_all_or_nothing(ctx in case_context()) {
        if let AssessmentOutcome::Report(report) = AssessmentPipeline::new().assess(&ctx, 0) {
            let any_probability = report.overall_win_probability.is_some()
                || report.all_angles.iter().any(|a| a.win_probability.is_some())
                || report.recommended_strategy.combined_probability.is_some();
            if report.probabilities_suppressed {
                prop_assert!(!any_probability, "suppressed report leaked a probability");
                prop_assert!(report.suppression_reason.is_some());
            } else {
                prop_assert!(report.overall_win_probability.is_some());
                prop_assert!(report.suppression_reason.is_none());
            }
        }
    }

    #[test]
    fn prop_text_gate_rejects_thin_single_documents(
        text in "[a-z ]{0,150}",
        area in practice_area(),
    ) {
        // Under 200 raw characters the gate must always refuse.
        let ctx = CaseContext::new(vec![Document::from_text(&text)], area);
        let outcome = AssessmentPipeline::new().assess(&ctx, 0);
        prop_assert!(outcome.as_report().is_none());
    }

    #[test]
    fn prop_batch_matches_sequential(cases in prop::collection::vec(case_context(), 0..4)) {
        let pipeline = AssessmentPipeline::new();
        let batch = pipeline.assess_batch(&cases, 3);
        prop_assert_eq!(batch.len(), cases.len());
        for (ctx, outcome) in cases.iter().zip(&batch) {
            let solo = pipeline.assess(ctx, 3);
            match (&solo, outcome) {
                (AssessmentOutcome::Report(a), AssessmentOutcome::Report(b)) => {
                    prop_assert_eq!(
                        serde_json::to_string(a).unwrap(),
                        serde_json::to_string(b).unwrap()
                    );
                }
                (
                    AssessmentOutcome::InsufficientText { code: a, .. },
                    AssessmentOutcome::InsufficientText { code: b, .. },
                ) => prop_assert_eq!(a, b),
                _ => prop_assert!(false, "batch and sequential outcomes diverged"),
            }
        }
    }
}
