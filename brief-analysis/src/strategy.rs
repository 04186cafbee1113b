//! Strategy ranking and combination.
//!
//! Takes the calibrated angle list and produces the ranked view, the
//! critical subset, and the single recommended compound strategy. All
//! of it is deterministic: ties break on severity rank, then on angle
//! type name, so identical inputs always produce identical reports.

use brief_core::config::thresholds::Thresholds;
use brief_core::types::evidence::{CalibrationDirectives, LanguageTone};
use brief_core::types::report::{
    clamp_probability, AngleType, DefenseAngle, RecommendedStrategy, Severity,
};
use smallvec::SmallVec;

/// Sort angles best-first: probability descending, then severity,
/// then type name for a stable total order.
pub fn rank(mut angles: Vec<DefenseAngle>) -> Vec<DefenseAngle> {
    angles.sort_by(|a, b| {
        b.win_probability
            .cmp(&a.win_probability)
            .then_with(|| b.severity.rank().cmp(&a.severity.rank()))
            .then_with(|| a.angle_type.name().cmp(b.angle_type.name()))
    });
    angles
}

/// The angles worth leading with: severe enough or likely enough,
/// capped so the report stays readable.
pub fn critical_angles(ranked: &[DefenseAngle], thresholds: &Thresholds) -> Vec<DefenseAngle> {
    ranked
        .iter()
        .filter(|a| {
            a.severity.rank() >= Severity::High.rank()
                || a.win_probability
                    .is_some_and(|p| p >= thresholds.critical_probability_bar)
        })
        .take(thresholds.max_critical_angles)
        .cloned()
        .collect()
}

/// Build the recommended strategy from a ranked angle list.
///
/// The primary angle is the top-ranked one. Supporting angles are
/// subsequent angles that either appear in the primary's declared
/// combinations or clear the supporting probability bar. The combined
/// probability adds diminishing-returns headroom on top of the primary
/// rather than summing probabilities. An empty list yields the neutral
/// merits-review strategy.
pub fn recommend(
    ranked: &[DefenseAngle],
    directives: &CalibrationDirectives,
    thresholds: &Thresholds,
) -> RecommendedStrategy {
    let Some(primary) = ranked.first().cloned() else {
        return neutral_strategy(directives, thresholds);
    };

    let supporting: Vec<DefenseAngle> = ranked[1..]
        .iter()
        .filter(|a| {
            primary.combines_with.contains(&a.angle_type)
                || a.win_probability
                    .is_some_and(|p| p >= thresholds.supporting_probability_bar)
        })
        .take(thresholds.max_supporting_angles)
        .cloned()
        .collect();

    let combined_probability = combine(&primary, &supporting, thresholds);
    let tactical_plan = tactical_plan(&primary, &supporting, directives);

    RecommendedStrategy {
        primary_angle: primary,
        supporting_angles: supporting,
        combined_probability,
        tactical_plan,
    }
}

/// Merits-review strategy used when no angle at all was generated.
fn neutral_strategy(
    directives: &CalibrationDirectives,
    thresholds: &Thresholds,
) -> RecommendedStrategy {
    let primary = DefenseAngle {
        id: "ANG-000".to_string(),
        angle_type: AngleType::EvidentialSufficiency,
        severity: Severity::Medium,
        win_probability: Some(thresholds.neutral_probability),
        title: "Review the case on its merits".to_string(),
        why_it_matters: "No specific strategic angle was generated; the case should be \
                         assessed element by element before committing to a strategy."
            .to_string(),
        legal_basis: "Burden and standard of proof".to_string(),
        opposing_weakness: String::new(),
        exploitation: "Map each element of the opposing case against its supporting \
                       evidence and revisit strategy once the gaps are known."
            .to_string(),
        arguments: Vec::new(),
        questions: Vec::new(),
        required_evidence: Vec::new(),
        combines_with: SmallVec::new(),
    };
    let tactical_plan = tactical_plan(&primary, &[], directives);
    RecommendedStrategy {
        combined_probability: primary.win_probability,
        primary_angle: primary,
        supporting_angles: Vec::new(),
        tactical_plan,
    }
}

/// Primary plus dampened headroom from the supporting average. A lone
/// primary keeps its own probability; the result never exceeds the cap
/// and never drops below the primary.
fn combine(
    primary: &DefenseAngle,
    supporting: &[DefenseAngle],
    thresholds: &Thresholds,
) -> Option<u8> {
    let base = primary.win_probability? as f64;
    let support: Vec<f64> = supporting
        .iter()
        .filter_map(|a| a.win_probability)
        .map(f64::from)
        .collect();
    if support.is_empty() {
        return primary.win_probability;
    }
    let avg_support = support.iter().sum::<f64>() / support.len() as f64;
    let combined = base + (100.0 - base) * (avg_support / 100.0) * thresholds.combiner_dampening;
    Some(clamp_probability(combined).min(thresholds.combined_probability_cap))
}

/// The tone directive sets how hard the opening move is pitched, and
/// the realistic-outcome directive closes the plan so the practitioner
/// always sees the strength-adjusted expectation.
fn tactical_plan(
    primary: &DefenseAngle,
    supporting: &[DefenseAngle],
    directives: &CalibrationDirectives,
) -> Vec<String> {
    let mut plan = Vec::with_capacity(5 + supporting.len());
    let lead = match directives.tone {
        LanguageTone::Assertive => "Press now",
        LanguageTone::Balanced => "Lead with",
        LanguageTone::Cautious => "Advance with care",
    };
    plan.push(format!("{lead}: {}. {}", primary.title, primary.exploitation));
    for argument in primary.arguments.iter().take(2) {
        plan.push(format!("Argue: {argument}"));
    }
    for question in primary.questions.iter().take(2) {
        plan.push(format!("Press: {question}"));
    }
    for angle in supporting {
        plan.push(format!("In parallel: {}. {}", angle.title, angle.opposing_weakness));
    }
    if !directives.realistic_outcome.is_empty() {
        plan.push(format!("Realistic outcome: {}", directives.realistic_outcome));
    }
    plan
}
