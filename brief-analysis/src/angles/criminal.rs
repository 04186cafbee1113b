//! Criminal practice rule set.
//!
//! Detention, interview, identification, disclosure, continuity,
//! forensic, and witness rules. Raw probabilities are type-specific
//! bases adjusted by measurable factors and clamped.

use brief_core::types::case::PracticeArea;
use brief_core::types::facts::{CaseFacts, CriminalFacts, GapSeverity};
use brief_core::types::report::{clamp_probability, AngleType, DefenseAngle, Severity};
use smallvec::smallvec;

use crate::corpus::{Corpus, PatternSet};

use super::AngleRuleSet;

/// Detention beyond this many hours without review supports a challenge.
const DETENTION_REVIEW_HOURS: u32 = 24;
/// Per-day probability uplift for overdue disclosure, and its cap.
const OVERDUE_UPLIFT_PER_DAY: f64 = 2.0;
const OVERDUE_UPLIFT_CAP: f64 = 20.0;

pub struct CriminalRuleSet;

impl AngleRuleSet for CriminalRuleSet {
    fn practice_area(&self) -> PracticeArea {
        PracticeArea::Criminal
    }

    fn generate(&self, facts: &CaseFacts, corpus: &Corpus) -> Vec<DefenseAngle> {
        let CaseFacts::Criminal(facts) = facts else {
            return Vec::new();
        };
        let mut angles = Vec::new();
        angles.extend(unlawful_detention(facts));
        angles.extend(interview_breach(facts));
        angles.extend(identification_weakness(corpus));
        angles.extend(disclosure_failure(facts));
        angles.extend(chain_of_custody(facts));
        angles.extend(forensic_challenge(corpus));
        angles.extend(witness_credibility(corpus));
        angles
    }
}

fn unlawful_detention(facts: &CriminalFacts) -> Option<DefenseAngle> {
    let log_incomplete = facts.compliance.custody_log_complete == Some(false);
    let over_hours = facts
        .compliance
        .detention_hours
        .filter(|h| *h > DETENTION_REVIEW_HOURS);
    if !log_incomplete && over_hours.is_none() {
        return None;
    }

    let mut probability = 55.0;
    if let Some(hours) = over_hours {
        probability += (((hours - DETENTION_REVIEW_HOURS) as f64) * 2.0).min(20.0);
    }

    Some(DefenseAngle {
        id: String::new(),
        angle_type: AngleType::UnlawfulDetention,
        severity: Severity::High,
        win_probability: Some(clamp_probability(probability)),
        title: "Challenge the lawfulness of detention".to_string(),
        why_it_matters: "Evidence obtained during an unlawful detention is vulnerable to \
                         exclusion, and the detention itself undermines the reliability of \
                         everything that followed in custody."
            .to_string(),
        legal_basis: "PACE 1984 ss.34-46 (detention clock and reviews); s.78 exclusion"
            .to_string(),
        opposing_weakness: if log_incomplete {
            "The custody log is incomplete, so the prosecution cannot prove the detention \
             was reviewed as required."
                .to_string()
        } else {
            format!(
                "Detention ran to {} hours; the review and authorisation trail will be \
                 scrutinised.",
                facts.compliance.detention_hours.unwrap_or(0)
            )
        },
        exploitation: "Requisition the full custody record, cross-check every review entry \
                       against the detention clock, and apply to exclude evidence obtained \
                       after the first missed review."
            .to_string(),
        arguments: vec![
            "The detention exceeded the statutory review framework.".to_string(),
            "An incomplete custody record cannot discharge the burden of proving lawful \
             detention."
                .to_string(),
        ],
        questions: vec![
            "Who authorised continued detention, and at what time?".to_string(),
            "Why is the custody log incomplete for the relevant window?".to_string(),
        ],
        required_evidence: vec![
            "Full custody record".to_string(),
            "Review authorisation entries".to_string(),
        ],
        combines_with: smallvec![AngleType::InterviewBreach],
    })
}

fn interview_breach(facts: &CriminalFacts) -> Option<DefenseAngle> {
    let compliance = &facts.compliance;
    let breaches: Vec<&str> = [
        (compliance.solicitor_present, "no solicitor present"),
        (compliance.interview_recorded, "interview not recorded"),
        (compliance.rights_given, "rights not given"),
        (compliance.caution_given, "caution not administered"),
    ]
    .iter()
    .filter(|(flag, _)| *flag == Some(false))
    .map(|(_, label)| *label)
    .collect();

    if breaches.is_empty() {
        return None;
    }

    let probability = (60.0 + 5.0 * (breaches.len() as f64 - 1.0)).min(70.0);
    let severity = if breaches.len() >= 2 {
        Severity::Critical
    } else {
        Severity::High
    };

    Some(DefenseAngle {
        id: String::new(),
        angle_type: AngleType::InterviewBreach,
        severity,
        win_probability: Some(clamp_probability(probability)),
        title: "Exclude the interview for procedural breaches".to_string(),
        why_it_matters: "The interview is often the spine of the prosecution narrative; \
                         excluding it can collapse the case to circumstantial material."
            .to_string(),
        legal_basis: "PACE 1984 Code C; s.58 access to legal advice; s.76/s.78 exclusion"
            .to_string(),
        opposing_weakness: format!("Recorded breaches: {}.", breaches.join(", ")),
        exploitation: "Apply under s.76/s.78 to exclude the interview in its entirety, and \
                       put each breach to the officer in charge of the investigation."
            .to_string(),
        arguments: breaches
            .iter()
            .map(|b| format!("The interview proceeded despite {b}."))
            .collect(),
        questions: vec![
            "Why was the interview allowed to proceed despite the recorded breach?".to_string(),
            "What training does the interviewing officer have on Code C?".to_string(),
        ],
        required_evidence: vec![
            "Custody record".to_string(),
            "Interview recording or contemporaneous note".to_string(),
        ],
        combines_with: smallvec![AngleType::UnlawfulDetention, AngleType::DisclosureFailure],
    })
}

fn identification_weakness(corpus: &Corpus) -> Option<DefenseAngle> {
    let eyewitness = PatternSet::new(&["eyewitness", "witness identified", "identified the defendant"]);
    let formal_procedure = PatternSet::new(&[
        "identification parade",
        "video identification",
        "identification procedure",
        "viper",
    ]);
    if !eyewitness.any_match(corpus.text()) || formal_procedure.any_match(corpus.text()) {
        return None;
    }

    Some(DefenseAngle {
        id: String::new(),
        angle_type: AngleType::IdentificationWeakness,
        severity: Severity::High,
        win_probability: Some(65),
        title: "Attack the identification evidence".to_string(),
        why_it_matters: "Identification appears to rest on informal eyewitness recognition \
                         with no formal procedure; this is the classic territory of mistaken \
                         identification."
            .to_string(),
        legal_basis: "PACE Code D; R v Turnbull guidance on identification evidence".to_string(),
        opposing_weakness: "No formal identification procedure appears in the papers despite \
                            identification being in issue."
            .to_string(),
        exploitation: "Press the Code D breach, seek a Turnbull direction, and test the \
                       witness's opportunity to observe in cross-examination."
            .to_string(),
        arguments: vec![
            "A disputed identification without a Code D procedure carries limited weight."
                .to_string(),
            "The conditions of observation were never tested by a formal procedure.".to_string(),
        ],
        questions: vec![
            "How long did the witness observe the person, and from what distance?".to_string(),
            "Why was no identification procedure held?".to_string(),
        ],
        required_evidence: vec![
            "First descriptions".to_string(),
            "CCTV continuity statements, if relied on".to_string(),
        ],
        combines_with: smallvec![AngleType::WitnessCredibility, AngleType::ForensicChallenge],
    })
}

fn disclosure_failure(facts: &CriminalFacts) -> Option<DefenseAngle> {
    if facts.disclosure_gaps.is_empty() {
        return None;
    }

    let any_material = facts
        .disclosure_gaps
        .iter()
        .any(|g| g.severity == GapSeverity::Material);
    let any_foundational = facts
        .disclosure_gaps
        .iter()
        .any(|g| g.severity == GapSeverity::Foundational);
    let max_days_overdue = facts
        .disclosure_gaps
        .iter()
        .filter_map(|g| g.days_overdue)
        .max()
        .unwrap_or(0);

    let mut probability = 50.0;
    if any_material {
        probability += 10.0;
    }
    if any_foundational {
        probability += 15.0;
    }
    probability += (max_days_overdue as f64 * OVERDUE_UPLIFT_PER_DAY).min(OVERDUE_UPLIFT_CAP);

    let severity = if any_foundational {
        Severity::Critical
    } else if any_material {
        Severity::High
    } else {
        Severity::Medium
    };

    let items: Vec<String> = facts
        .disclosure_gaps
        .iter()
        .map(|g| g.item.clone())
        .collect();

    Some(DefenseAngle {
        id: String::new(),
        angle_type: AngleType::DisclosureFailure,
        severity,
        win_probability: Some(clamp_probability(probability.min(90.0))),
        title: "Press the disclosure failures".to_string(),
        why_it_matters: "The prosecution has not disclosed material capable of undermining \
                         its case or assisting the defence; the trial cannot fairly proceed \
                         until it does."
            .to_string(),
        legal_basis: "CPIA 1996 ss.3/7A; Criminal Procedure Rules Part 15".to_string(),
        opposing_weakness: format!(
            "Outstanding items: {}. Worst item is {} days overdue.",
            items.join("; "),
            max_days_overdue
        ),
        exploitation: "Serve a defence statement targeting each gap, seek a s.8 application, \
                       and if the failures persist apply for a stay of proceedings as an \
                       abuse of process."
            .to_string(),
        arguments: vec![
            "Continued non-disclosure amounts to an abuse of process.".to_string(),
            "The defence cannot be advised, still less advanced, without the outstanding \
             material."
                .to_string(),
        ],
        questions: vec![
            "When was each outstanding item first identified on the unused schedule?"
                .to_string(),
            "Who reviewed the material and decided it did not meet the disclosure test?"
                .to_string(),
        ],
        required_evidence: items,
        combines_with: smallvec![AngleType::InterviewBreach, AngleType::UnlawfulDetention],
    })
}

fn chain_of_custody(facts: &CriminalFacts) -> Option<DefenseAngle> {
    let broken: Vec<_> = facts
        .evidence_items
        .iter()
        .filter(|item| item.continuity_confirmed == Some(false))
        .collect();
    if broken.is_empty() {
        return None;
    }

    let severity = if broken.iter().any(|i| i.foundational) {
        Severity::High
    } else {
        Severity::Medium
    };
    let labels: Vec<String> = broken.iter().map(|i| i.label.clone()).collect();

    Some(DefenseAngle {
        id: String::new(),
        angle_type: AngleType::ChainOfCustody,
        severity,
        win_probability: Some(55),
        title: "Break the chain of custody".to_string(),
        why_it_matters: "An exhibit whose continuity cannot be proved is an exhibit the jury \
                         cannot safely rely on."
            .to_string(),
        legal_basis: "Continuity/exhibit handling principles; s.78 PACE 1984".to_string(),
        opposing_weakness: format!("Continuity is unconfirmed for: {}.", labels.join(", ")),
        exploitation: "Demand the full exhibit movement log for each item and put every \
                       unexplained transfer to the exhibits officer."
            .to_string(),
        arguments: vec![
            "The prosecution cannot prove the exhibit before the court is the exhibit seized."
                .to_string(),
        ],
        questions: vec![
            "Who held the exhibit between seizure and submission, and where is that recorded?"
                .to_string(),
        ],
        required_evidence: vec!["Exhibit movement logs".to_string()],
        combines_with: smallvec![AngleType::ForensicChallenge],
    })
}

fn forensic_challenge(corpus: &Corpus) -> Option<DefenseAngle> {
    let forensic = PatternSet::new(&["dna", "fingerprint", "forensic"]);
    if !forensic.any_match(corpus.text()) {
        return None;
    }

    Some(DefenseAngle {
        id: String::new(),
        angle_type: AngleType::ForensicChallenge,
        severity: Severity::Medium,
        win_probability: Some(45),
        title: "Test the forensic methodology".to_string(),
        why_it_matters: "Forensic conclusions are only as strong as the sampling, transfer \
                         reasoning, and statistical basis behind them."
            .to_string(),
        legal_basis: "Criminal Procedure Rules Part 19 (expert evidence)".to_string(),
        opposing_weakness: "The forensic findings have not yet been tested against secondary \
                            transfer or contamination explanations."
            .to_string(),
        exploitation: "Instruct a defence expert to review the case file, focusing on \
                       transfer, persistence, and the match statistics relied on."
            .to_string(),
        arguments: vec![
            "Presence is not participation: transfer explanations remain open.".to_string(),
        ],
        questions: vec![
            "What anti-contamination measures are documented at scene and lab?".to_string(),
        ],
        required_evidence: vec!["Full forensic case file".to_string()],
        combines_with: smallvec![AngleType::ChainOfCustody, AngleType::IdentificationWeakness],
    })
}

fn witness_credibility(corpus: &Corpus) -> Option<DefenseAngle> {
    let credibility = PatternSet::new(&[
        "inconsistent",
        "changed his account",
        "changed her account",
        "retracted",
        "previous convictions",
    ]);
    if !credibility.any_match(corpus.text()) {
        return None;
    }

    Some(DefenseAngle {
        id: String::new(),
        angle_type: AngleType::WitnessCredibility,
        severity: Severity::Medium,
        win_probability: Some(50),
        title: "Undermine witness credibility".to_string(),
        why_it_matters: "Inconsistent or retracted accounts go directly to the reliability \
                         of the prosecution narrative."
            .to_string(),
        legal_basis: "Cross-examination on prior inconsistent statements; bad character \
                      provisions, CJA 2003 s.100"
            .to_string(),
        opposing_weakness: "The papers record inconsistencies or retractions in witness \
                            accounts."
            .to_string(),
        exploitation: "Build a schedule of inconsistencies across every account and deploy \
                       it in cross-examination."
            .to_string(),
        arguments: vec![
            "A narrative that shifts between tellings cannot found a conviction.".to_string(),
        ],
        questions: vec![
            "Which account does the witness now say is true, and why did it change?"
                .to_string(),
        ],
        required_evidence: vec!["All witness statements and first accounts".to_string()],
        combines_with: smallvec![AngleType::IdentificationWeakness],
    })
}
