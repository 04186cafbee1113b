//! Family practice rule set.

use brief_core::types::case::PracticeArea;
use brief_core::types::facts::{CaseFacts, FamilyFacts, GapSeverity};
use brief_core::types::report::{clamp_probability, AngleType, DefenseAngle, Severity};
use smallvec::smallvec;

use crate::corpus::Corpus;

use super::AngleRuleSet;

pub struct FamilyRuleSet;

impl AngleRuleSet for FamilyRuleSet {
    fn practice_area(&self) -> PracticeArea {
        PracticeArea::Family
    }

    fn generate(&self, facts: &CaseFacts, _corpus: &Corpus) -> Vec<DefenseAngle> {
        let CaseFacts::Family(facts) = facts else {
            return Vec::new();
        };
        let mut angles = Vec::new();
        angles.extend(financial_disclosure_failure(facts));
        angles.extend(welfare_report_challenge(facts));
        angles
    }
}

fn financial_disclosure_failure(facts: &FamilyFacts) -> Option<DefenseAngle> {
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
    let probability = 55.0 + (max_days as f64 * 2.0).min(15.0);

    Some(DefenseAngle {
        id: String::new(),
        angle_type: AngleType::FinancialDisclosureFailure,
        severity: if any_foundational {
            Severity::Critical
        } else {
            Severity::High
        },
        win_probability: Some(clamp_probability(probability)),
        title: "Pursue the incomplete financial disclosure".to_string(),
        why_it_matters: "A fair financial outcome is impossible while assets and income \
                         remain undisclosed; the court draws adverse inferences against \
                         non-disclosers."
            .to_string(),
        legal_basis: "FPR Part 9; duty of full and frank disclosure".to_string(),
        opposing_weakness: format!(
            "{} disclosure item(s) outstanding, up to {} days overdue.",
            facts.disclosure_gaps.len(),
            max_days
        ),
        exploitation: "Serve a focused questionnaire on each gap and invite the court to \
                       draw adverse inferences if answers are not forthcoming."
            .to_string(),
        arguments: vec![
            "The disclosure given falls short of the duty of full and frank disclosure."
                .to_string(),
        ],
        questions: vec![
            "What accounts, policies, or interests exist that are not in Form E?".to_string(),
        ],
        required_evidence: facts.disclosure_gaps.iter().map(|g| g.item.clone()).collect(),
        combines_with: smallvec![AngleType::NegotiatedResolution],
    })
}

fn welfare_report_challenge(facts: &FamilyFacts) -> Option<DefenseAngle> {
    if facts.welfare_report_present != Some(false) {
        return None;
    }

    Some(DefenseAngle {
        id: String::new(),
        angle_type: AngleType::WelfareReportChallenge,
        severity: Severity::Medium,
        win_probability: Some(45),
        title: "Seek a section 7 welfare report".to_string(),
        why_it_matters: "Welfare decisions made without an independent report rest on \
                         untested assertions from the parties."
            .to_string(),
        legal_basis: "Children Act 1989 s.7".to_string(),
        opposing_weakness: "No welfare report has been prepared despite disputed welfare \
                            issues."
            .to_string(),
        exploitation: "Apply for a s.7 report directed at the disputed welfare questions \
                       before any final hearing is listed."
            .to_string(),
        arguments: vec![
            "The court cannot safely determine welfare without independent evidence."
                .to_string(),
        ],
        questions: vec![
            "What independent evidence supports the current arrangements?".to_string(),
        ],
        required_evidence: vec!["Safeguarding letter".to_string()],
        combines_with: smallvec![AngleType::NegotiatedResolution],
    })
}
