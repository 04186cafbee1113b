//! Calibration engine.
//!
//! Downward-only adjustment of angle probabilities against the opposing
//! evidence strength. General damping applies above the moderate and
//! high strength thresholds; type-specific directives apply stronger
//! damping and soften aggressive disclosure framing. Calibration never
//! raises a probability.

use brief_core::config::thresholds::Thresholds;
use brief_core::types::evidence::EvidenceStrengthResult;
use brief_core::types::report::{clamp_probability, AngleType, DefenseAngle};

/// Apply calibration to every angle. Pure: input order is preserved.
pub fn calibrate(
    mut angles: Vec<DefenseAngle>,
    strength: &EvidenceStrengthResult,
    thresholds: &Thresholds,
) -> Vec<DefenseAngle> {
    for angle in &mut angles {
        let Some(raw) = angle.win_probability else {
            continue;
        };

        let (scale, floor) = if strength.directives.downgrade_types.contains(&angle.angle_type) {
            (thresholds.override_scale, thresholds.override_floor)
        } else if strength.overall_strength >= thresholds.high_strength {
            (thresholds.high_scale, thresholds.high_floor)
        } else if strength.overall_strength >= thresholds.moderate_strength {
            (thresholds.moderate_scale, thresholds.moderate_floor)
        } else {
            continue;
        };

        let scaled = clamp_probability(raw as f64 * scale);
        // The floor cushions the damping but must never raise the
        // probability above its pre-calibration value.
        let calibrated = raw.min(scaled.max(floor));
        if calibrated != raw {
            tracing::debug!(
                angle = %angle.angle_type,
                raw,
                calibrated,
                "angle probability calibrated down"
            );
        }
        angle.win_probability = Some(calibrated);

        if strength.directives.soften_disclosure_language
            && matches!(
                angle.angle_type,
                AngleType::DisclosureFailure | AngleType::FinancialDisclosureFailure
            )
        {
            soften_angle_language(angle);
        }
    }
    angles
}

/// Severity-weighted aggregate of the top calibrated angles. The
/// case-level number is recomputed from the angle-level numbers rather
/// than recalibrated from its own prior value, so the two stay
/// consistent.
pub fn overall_probability(angles: &[DefenseAngle], thresholds: &Thresholds) -> u8 {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for angle in angles.iter().take(5) {
        let Some(p) = angle.win_probability else {
            continue;
        };
        let weight = angle.severity.rank() as f64;
        weighted_sum += p as f64 * weight;
        weight_total += weight;
    }
    if weight_total == 0.0 {
        return thresholds.neutral_probability;
    }
    clamp_probability(weighted_sum / weight_total)
}

/// Replace stay/abuse-of-process framing with softer procedural
/// framing when the disclosure record does not support aggression.
fn soften_angle_language(angle: &mut DefenseAngle) {
    for text in std::iter::once(&mut angle.exploitation)
        .chain(std::iter::once(&mut angle.why_it_matters))
        .chain(angle.arguments.iter_mut())
    {
        *text = soften(text);
    }
}

fn soften(text: &str) -> String {
    text.replace(
        "apply for a stay of proceedings as an abuse of process",
        "seek further procedural directions on the outstanding material",
    )
    .replace(
        "a stay of proceedings as an abuse of process",
        "further procedural directions",
    )
    .replace("stay of proceedings", "procedural directions")
    .replace("amounts to an abuse of process", "warrants case-management directions")
    .replace("abuse of process", "procedural failing")
}
