//! The assessment pipeline.
//!
//! Orchestrates one case end to end: corpus build, text gate, fact
//! validation, completeness assessment, evidence strength, angle
//! generation, calibration, ranking, recommendation, visibility gate.
//! The pipeline is pure apart from the caller-supplied timestamp, so
//! identical input snapshots always produce identical reports.

use brief_core::config::thresholds::Thresholds;
use brief_core::types::case::CaseContext;
use brief_core::types::facts::CaseFacts;
use brief_core::types::report::{
    Diagnostics, ReasonCode, RecommendedStrategy, StrategyReport,
};
use rayon::prelude::*;

use crate::angles::{create_default_registry, RuleSetRegistry};
use crate::calibration;
use crate::corpus::Corpus;
use crate::evidence::analyzer::EvidenceAnalyzer;
use crate::gates::{completeness, text_sufficiency, visibility};
use crate::strategy;

/// Outcome of assessing one case. Insufficient text is an expected
/// outcome, not an error: the caller renders the banner instead of a
/// report.
#[derive(Debug, Clone)]
pub enum AssessmentOutcome {
    Report(Box<StrategyReport>),
    InsufficientText {
        code: ReasonCode,
        banner: String,
        diagnostics: Diagnostics,
    },
}

impl AssessmentOutcome {
    pub fn as_report(&self) -> Option<&StrategyReport> {
        match self {
            Self::Report(report) => Some(report),
            Self::InsufficientText { .. } => None,
        }
    }
}

pub struct AssessmentPipeline {
    thresholds: Thresholds,
    registry: RuleSetRegistry,
}

impl AssessmentPipeline {
    /// Pipeline with canonical thresholds and every shipped rule set.
    pub fn new() -> Self {
        Self::with_thresholds(Thresholds::default())
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            registry: create_default_registry(),
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Assess one case. `now_ms` is the only nondeterministic input and
    /// is echoed verbatim as `generated_at`.
    pub fn assess(&self, ctx: &CaseContext, now_ms: u64) -> AssessmentOutcome {
        let corpus = Corpus::build(ctx);

        let stats = match text_sufficiency::check(&corpus, &self.thresholds) {
            Ok(stats) => stats,
            Err(failure) => {
                tracing::info!(code = failure.code.name(), "text gate rejected case");
                return AssessmentOutcome::InsufficientText {
                    code: failure.code,
                    banner: failure.banner,
                    diagnostics: Diagnostics {
                        document_count: corpus.document_count,
                        total_raw_chars: corpus.total_raw_chars,
                        reason_codes: vec![failure.code],
                    },
                };
            }
        };
        tracing::debug!(
            documents = stats.document_count,
            chars = stats.total_raw_chars,
            "text gate passed"
        );

        let validated = CaseFacts::validate(ctx);
        let mut warnings = validated.warnings;

        let bundle = completeness::assess(&corpus, ctx.practice_area);
        tracing::debug!(
            completeness = bundle.percentage,
            critical_missing = bundle.critical_missing,
            "bundle assessed"
        );

        let strength = EvidenceAnalyzer::new().analyze(&corpus, &validated.facts);
        warnings.extend(strength.warnings.iter().cloned());

        let raw_angles = self
            .registry
            .generate(ctx.practice_area, &validated.facts, &corpus);
        let calibrated = calibration::calibrate(raw_angles, &strength, &self.thresholds);
        let ranked = strategy::rank(calibrated);

        let overall = calibration::overall_probability(&ranked, &self.thresholds);
        let critical = strategy::critical_angles(&ranked, &self.thresholds);
        let recommended = strategy::recommend(&ranked, &strength.directives, &self.thresholds);

        let (decision, reason_codes) =
            visibility::decide(ctx.practice_area, &bundle, &self.thresholds);

        let mut report = StrategyReport {
            overall_win_probability: Some(overall),
            all_angles: ranked,
            critical_angles: critical,
            recommended_strategy: recommended,
            realistic_outcome: strength.directives.realistic_outcome.clone(),
            tone: strength.directives.tone,
            probabilities_suppressed: !decision.show,
            suppression_reason: decision.reason,
            warnings,
            diagnostics: Diagnostics {
                document_count: stats.document_count,
                total_raw_chars: stats.total_raw_chars,
                reason_codes,
            },
            generated_at: now_ms,
        };

        if !decision.show {
            suppress_probabilities(&mut report);
            if let Some(banner) = decision.banner {
                report.warnings.push(banner);
            }
            tracing::info!("visibility gate suppressed numeric confidence");
        }

        AssessmentOutcome::Report(Box::new(report))
    }

    /// Assess a batch in parallel. Output order matches input order.
    pub fn assess_batch(&self, cases: &[CaseContext], now_ms: u64) -> Vec<AssessmentOutcome> {
        cases
            .par_iter()
            .map(|ctx| self.assess(ctx, now_ms))
            .collect()
    }
}

impl Default for AssessmentPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Null every numeric probability in the report while leaving the
/// qualitative content untouched.
fn suppress_probabilities(report: &mut StrategyReport) {
    report.overall_win_probability = None;
    for angle in report
        .all_angles
        .iter_mut()
        .chain(report.critical_angles.iter_mut())
    {
        angle.win_probability = None;
    }
    let RecommendedStrategy {
        primary_angle,
        supporting_angles,
        combined_probability,
        ..
    } = &mut report.recommended_strategy;
    primary_angle.win_probability = None;
    combined_probability.take();
    for angle in supporting_angles {
        angle.win_probability = None;
    }
}
