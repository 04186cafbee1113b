//! Civil litigation rule set.

use brief_core::types::case::PracticeArea;
use brief_core::types::facts::{CaseFacts, CivilFacts, GapSeverity};
use brief_core::types::report::{clamp_probability, AngleType, DefenseAngle, Severity};
use smallvec::smallvec;

use crate::corpus::Corpus;

use super::AngleRuleSet;

/// Days overdue on directions before the angle escalates to High.
const DIRECTIONS_ESCALATION_DAYS: u32 = 28;

pub struct CivilRuleSet;

impl AngleRuleSet for CivilRuleSet {
    fn practice_area(&self) -> PracticeArea {
        PracticeArea::Civil
    }

    fn generate(&self, facts: &CaseFacts, _corpus: &Corpus) -> Vec<DefenseAngle> {
        let CaseFacts::Civil(facts) = facts else {
            return Vec::new();
        };
        let mut angles = Vec::new();
        angles.extend(limitation_defence(facts));
        angles.extend(directions_non_compliance(facts));
        angles.extend(disclosure_failure(facts));
        angles.extend(expert_evidence_challenge(facts));
        angles.extend(quantum_dispute(facts));
        angles
    }
}

fn limitation_defence(facts: &CivilFacts) -> Option<DefenseAngle> {
    if facts.limitation_expired != Some(true) {
        return None;
    }

    Some(DefenseAngle {
        id: String::new(),
        angle_type: AngleType::LimitationDefence,
        severity: Severity::Critical,
        win_probability: Some(80),
        title: "Plead limitation".to_string(),
        why_it_matters: "A claim issued out of time fails regardless of its merits; this is \
                         a complete defence."
            .to_string(),
        legal_basis: "Limitation Act 1980".to_string(),
        opposing_weakness: "The claim appears to have been issued after the limitation \
                            period expired."
            .to_string(),
        exploitation: "Plead limitation in the defence and seek a preliminary issue hearing \
                       or strike-out before costs accumulate."
            .to_string(),
        arguments: vec![
            "The cause of action accrued outside the limitation period.".to_string(),
            "No basis for disapplication has been pleaded.".to_string(),
        ],
        questions: vec![
            "When does the claimant say the cause of action accrued, and on what evidence?"
                .to_string(),
        ],
        required_evidence: vec!["Chronology of accrual and issue dates".to_string()],
        combines_with: smallvec![AngleType::DirectionsNonCompliance],
    })
}

fn directions_non_compliance(facts: &CivilFacts) -> Option<DefenseAngle> {
    let days = facts.directions_days_overdue.filter(|d| *d > 0)?;
    let probability = 45.0 + (days as f64 * 2.0).min(20.0);
    let severity = if days >= DIRECTIONS_ESCALATION_DAYS {
        Severity::High
    } else {
        Severity::Medium
    };

    Some(DefenseAngle {
        id: String::new(),
        angle_type: AngleType::DirectionsNonCompliance,
        severity,
        win_probability: Some(clamp_probability(probability)),
        title: "Enforce the breached directions".to_string(),
        why_it_matters: format!(
            "The opposing party is {days} days in breach of court directions; the court's \
             case-management powers now favour the compliant party."
        ),
        legal_basis: "CPR 3.4, 3.8-3.9 (sanctions and relief); Denton principles".to_string(),
        opposing_weakness: "Non-compliance is a matter of record and relief from sanctions \
                            is not automatic."
            .to_string(),
        exploitation: "Apply for an unless order with costs, and oppose any relief \
                       application on Denton grounds."
            .to_string(),
        arguments: vec![
            "The breach is serious and significant under the first Denton limb.".to_string(),
        ],
        questions: vec![
            "What explanation is offered for the delay, and when was it first raised?"
                .to_string(),
        ],
        required_evidence: vec!["Order breached and service correspondence".to_string()],
        combines_with: smallvec![
            AngleType::ExpertEvidenceChallenge,
            AngleType::QuantumDispute
        ],
    })
}

fn disclosure_failure(facts: &CivilFacts) -> Option<DefenseAngle> {
    if facts.disclosure_gaps.is_empty() {
        return None;
    }

    let any_foundational = facts
        .disclosure_gaps
        .iter()
        .any(|g| g.severity == GapSeverity::Foundational);
    let max_days = facts
        .disclosure_gaps
        .iter()
        .filter_map(|g| g.days_overdue)
        .max()
        .unwrap_or(0);
    let probability = 50.0 + (max_days as f64 * 2.0).min(20.0);

    Some(DefenseAngle {
        id: String::new(),
        angle_type: AngleType::DisclosureFailure,
        severity: if any_foundational {
            Severity::High
        } else {
            Severity::Medium
        },
        win_probability: Some(clamp_probability(probability)),
        title: "Compel the outstanding disclosure".to_string(),
        why_it_matters: "Documents central to the pleaded case remain undisclosed; the \
                         court will not let a party litigate while withholding them."
            .to_string(),
        legal_basis: "CPR Part 31; specific disclosure under CPR 31.12".to_string(),
        opposing_weakness: format!(
            "{} disclosure item(s) outstanding, up to {} days overdue.",
            facts.disclosure_gaps.len(),
            max_days
        ),
        exploitation: "Apply for specific disclosure with an unless order, and reserve the \
                       right to seek a stay of proceedings as an abuse of process if the \
                       withholding continues."
            .to_string(),
        arguments: vec![
            "The disclosure list is incomplete on its face.".to_string(),
        ],
        questions: vec![
            "What searches were conducted, by whom, and over what date range?".to_string(),
        ],
        required_evidence: facts.disclosure_gaps.iter().map(|g| g.item.clone()).collect(),
        combines_with: smallvec![AngleType::DirectionsNonCompliance],
    })
}

fn expert_evidence_challenge(facts: &CivilFacts) -> Option<DefenseAngle> {
    if facts.expert_report_served != Some(false) {
        return None;
    }

    Some(DefenseAngle {
        id: String::new(),
        angle_type: AngleType::ExpertEvidenceChallenge,
        severity: Severity::Medium,
        win_probability: Some(55),
        title: "Exclude the unserved expert evidence".to_string(),
        why_it_matters: "A party who has not served expert evidence in time needs the \
                         court's permission to rely on it at all."
            .to_string(),
        legal_basis: "CPR Part 35".to_string(),
        opposing_weakness: "No compliant expert report has been served.".to_string(),
        exploitation: "Oppose any late application for permission and invite the court to \
                       decide the issue on the existing evidence."
            .to_string(),
        arguments: vec![
            "Expert evidence is inadmissible without permission under CPR 35.4.".to_string(),
        ],
        questions: vec![
            "When was the expert first instructed, and why was no report served?".to_string(),
        ],
        required_evidence: vec!["Directions timetable for expert evidence".to_string()],
        combines_with: smallvec![AngleType::QuantumDispute],
    })
}

fn quantum_dispute(facts: &CivilFacts) -> Option<DefenseAngle> {
    if facts.quantum_disputed != Some(true) {
        return None;
    }

    Some(DefenseAngle {
        id: String::new(),
        angle_type: AngleType::QuantumDispute,
        severity: Severity::Medium,
        win_probability: Some(50),
        title: "Contest quantum".to_string(),
        why_it_matters: "Even if liability is found, the pleaded loss is contested; a \
                         substantial reduction changes the settlement calculus entirely."
            .to_string(),
        legal_basis: "Ordinary principles of causation, mitigation, and proof of loss"
            .to_string(),
        opposing_weakness: "Heads of loss are disputed and under-evidenced.".to_string(),
        exploitation: "Serve a counter-schedule of loss and a well-judged Part 36 offer \
                       pitched to the realistic quantum."
            .to_string(),
        arguments: vec![
            "The claimant has not proved the loss claimed.".to_string(),
            "Mitigation has not been addressed.".to_string(),
        ],
        questions: vec![
            "What documents support each head of loss?".to_string(),
        ],
        required_evidence: vec!["Schedule of loss with supporting documents".to_string()],
        combines_with: smallvec![AngleType::ExpertEvidenceChallenge],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_core::types::case::{CaseContext, Document};
    use brief_core::types::facts::DisclosureGap;

    fn corpus() -> Corpus {
        Corpus::build(&CaseContext::new(
            vec![Document::from_text("claim papers")],
            PracticeArea::Civil,
        ))
    }

    #[test]
    fn test_limitation_is_critical() {
        let facts = CivilFacts {
            limitation_expired: Some(true),
            ..Default::default()
        };
        let angles = CivilRuleSet.generate(&CaseFacts::Civil(facts), &corpus());
        assert_eq!(angles.len(), 1);
        assert_eq!(angles[0].angle_type, AngleType::LimitationDefence);
        assert_eq!(angles[0].severity, Severity::Critical);
    }

    #[test]
    fn test_directions_overdue_scaling_and_escalation() {
        let mild = CivilFacts {
            directions_days_overdue: Some(7),
            ..Default::default()
        };
        let angle = directions_non_compliance(&mild).unwrap();
        assert_eq!(angle.win_probability, Some(59));
        assert_eq!(angle.severity, Severity::Medium);

        let late = CivilFacts {
            directions_days_overdue: Some(45),
            ..Default::default()
        };
        let angle = directions_non_compliance(&late).unwrap();
        assert_eq!(angle.win_probability, Some(65), "uplift caps at +20");
        assert_eq!(angle.severity, Severity::High);
    }

    #[test]
    fn test_zero_days_overdue_does_not_trigger() {
        let facts = CivilFacts {
            directions_days_overdue: Some(0),
            ..Default::default()
        };
        assert!(directions_non_compliance(&facts).is_none());
    }

    #[test]
    fn test_disclosure_gap_severity_escalates() {
        let facts = CivilFacts {
            disclosure_gaps: vec![DisclosureGap {
                item: "ledger".to_string(),
                severity: GapSeverity::Foundational,
                days_overdue: Some(3),
            }],
            ..Default::default()
        };
        let angle = disclosure_failure(&facts).unwrap();
        assert_eq!(angle.severity, Severity::High);
        assert_eq!(angle.win_probability, Some(56));
    }
}
