//! Guaranteed fallback rule set.
//!
//! Always emits the generic evidential-sufficiency and
//! negotiated-resolution angles, for every practice area, so the
//! pipeline can never return an empty strategy.

use brief_core::types::case::PracticeArea;
use brief_core::types::facts::CaseFacts;
use brief_core::types::report::{AngleType, DefenseAngle, Severity};
use smallvec::smallvec;

use crate::corpus::Corpus;

use super::AngleRuleSet;

pub struct FallbackRuleSet;

impl AngleRuleSet for FallbackRuleSet {
    fn practice_area(&self) -> PracticeArea {
        PracticeArea::General
    }

    fn generate(&self, _facts: &CaseFacts, _corpus: &Corpus) -> Vec<DefenseAngle> {
        vec![evidential_sufficiency(), negotiated_resolution()]
    }
}

fn evidential_sufficiency() -> DefenseAngle {
    DefenseAngle {
        id: String::new(),
        angle_type: AngleType::EvidentialSufficiency,
        severity: Severity::Medium,
        win_probability: Some(35),
        title: "Review evidential sufficiency".to_string(),
        why_it_matters: "Every case should be tested against the question of whether the \
                         evidence, taken at its highest, actually proves each element."
            .to_string(),
        legal_basis: "Burden and standard of proof; submission of no case to answer where \
                      available"
            .to_string(),
        opposing_weakness: "The opposing case has not yet been mapped element-by-element \
                            against its evidence."
            .to_string(),
        exploitation: "Build an element-by-element proof matrix and target the weakest link \
                       in disclosure requests and cross-examination."
            .to_string(),
        arguments: vec![
            "At least one element of the case rests on inference rather than evidence."
                .to_string(),
        ],
        questions: vec![
            "Which exhibit or witness proves each element of the case?".to_string(),
        ],
        required_evidence: vec!["Complete served evidence".to_string()],
        combines_with: smallvec![AngleType::NegotiatedResolution],
    }
}

fn negotiated_resolution() -> DefenseAngle {
    DefenseAngle {
        id: String::new(),
        angle_type: AngleType::NegotiatedResolution,
        severity: Severity::Low,
        win_probability: Some(45),
        title: "Prepare a negotiated resolution track".to_string(),
        why_it_matters: "A credible negotiation position, prepared early, protects the \
                         client whichever way the contested issues resolve."
            .to_string(),
        legal_basis: "Without-prejudice negotiation; applicable settlement and plea \
                      frameworks"
            .to_string(),
        opposing_weakness: "Contested litigation carries cost and outcome risk for the \
                            opposing party too."
            .to_string(),
        exploitation: "Open a without-prejudice channel once the strongest procedural angle \
                       has been advanced, trading certainty against the identified risks."
            .to_string(),
        arguments: vec![
            "Early resolution limits irrecoverable cost on both sides.".to_string(),
        ],
        questions: Vec::new(),
        required_evidence: vec!["Client instructions on acceptable outcomes".to_string()],
        combines_with: smallvec![AngleType::EvidentialSufficiency],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_core::types::case::{CaseContext, Document};
    use brief_core::types::facts::GeneralFacts;

    #[test]
    fn test_fallback_always_emits_two_angles() {
        let corpus = Corpus::build(&CaseContext::new(
            vec![Document::from_text("")],
            PracticeArea::General,
        ));
        let angles =
            FallbackRuleSet.generate(&CaseFacts::General(GeneralFacts::default()), &corpus);
        assert_eq!(angles.len(), 2);
        assert!(angles.iter().all(|a| a.win_probability.is_some()));
    }
}
