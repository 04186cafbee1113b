//! Angle generation.
//!
//! One generation pipeline parameterized by injected per-practice-area
//! rule sets. Each rule set inspects the validated facts and the corpus
//! and emits zero or more candidate angles; the fallback set always
//! fires so the pipeline never returns an empty strategy.

pub mod civil;
pub mod criminal;
pub mod fallback;
pub mod family;

use brief_core::types::case::PracticeArea;
use brief_core::types::collections::FxHashSet;
use brief_core::types::facts::CaseFacts;
use brief_core::types::report::{AngleType, DefenseAngle};

use crate::corpus::Corpus;

/// A rule set for one practice area.
pub trait AngleRuleSet: Send + Sync {
    /// The practice area this rule set serves.
    fn practice_area(&self) -> PracticeArea;

    /// Inspect the facts and corpus, emit candidate angles. Raw win
    /// probabilities only — calibration happens downstream.
    fn generate(&self, facts: &CaseFacts, corpus: &Corpus) -> Vec<DefenseAngle>;
}

/// Registry of rule sets with per-area dispatch and deduplication.
pub struct RuleSetRegistry {
    rule_sets: Vec<Box<dyn AngleRuleSet>>,
    fallback: Box<dyn AngleRuleSet>,
}

impl RuleSetRegistry {
    /// Create a registry with only the guaranteed fallback set.
    pub fn new() -> Self {
        Self {
            rule_sets: Vec::new(),
            fallback: Box::new(fallback::FallbackRuleSet),
        }
    }

    /// Register a practice-area rule set.
    pub fn register(&mut self, rule_set: Box<dyn AngleRuleSet>) {
        self.rule_sets.push(rule_set);
    }

    /// Generate raw angles for one case: every rule set matching the
    /// practice area runs, then the fallback, then deduplication by
    /// (angle_type, title) keeping the first (most specific) candidate.
    /// The result is never empty.
    pub fn generate(
        &self,
        area: PracticeArea,
        facts: &CaseFacts,
        corpus: &Corpus,
    ) -> Vec<DefenseAngle> {
        let mut candidates = Vec::new();
        for rule_set in &self.rule_sets {
            if rule_set.practice_area() == area {
                candidates.extend(rule_set.generate(facts, corpus));
            }
        }
        candidates.extend(self.fallback.generate(facts, corpus));

        let mut seen: FxHashSet<(AngleType, String)> = FxHashSet::default();
        let mut angles = Vec::with_capacity(candidates.len());
        for mut angle in candidates {
            let key = (angle.angle_type, angle.title.clone());
            if seen.insert(key) {
                angle.id = format!("ANG-{:03}", angles.len() + 1);
                angles.push(angle);
            }
        }

        tracing::debug!(area = %area, count = angles.len(), "angles generated");
        angles
    }
}

impl Default for RuleSetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a registry with every shipped rule set.
pub fn create_default_registry() -> RuleSetRegistry {
    let mut registry = RuleSetRegistry::new();
    registry.register(Box::new(criminal::CriminalRuleSet));
    registry.register(Box::new(civil::CivilRuleSet));
    registry.register(Box::new(family::FamilyRuleSet));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_core::types::case::{CaseContext, Document};
    use brief_core::types::facts::GeneralFacts;

    #[test]
    fn test_generation_never_empty() {
        let registry = create_default_registry();
        let corpus = Corpus::build(&CaseContext::new(
            vec![Document::from_text("nothing of note")],
            PracticeArea::General,
        ));
        let facts = CaseFacts::General(GeneralFacts::default());
        for area in PracticeArea::all() {
            let angles = registry.generate(*area, &facts, &corpus);
            assert!(!angles.is_empty(), "empty angle list for {area}");
        }
    }

    #[test]
    fn test_ids_are_sequential_and_unique() {
        let registry = create_default_registry();
        let corpus = Corpus::build(&CaseContext::new(
            vec![Document::from_text("x")],
            PracticeArea::General,
        ));
        let facts = CaseFacts::General(GeneralFacts::default());
        let angles = registry.generate(PracticeArea::General, &facts, &corpus);
        for (idx, angle) in angles.iter().enumerate() {
            assert_eq!(angle.id, format!("ANG-{:03}", idx + 1));
        }
    }
}
