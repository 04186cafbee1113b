//! Validated case facts.
//!
//! The upstream extraction layer hands over loosely-typed JSON. Rather
//! than duck-typing into that JSON from every rule function, the engine
//! validates it exactly once at the boundary into a discriminated union
//! per practice area. Absent or malformed fields become "not proven"
//! defaults plus a warning — validation never fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::case::{CaseContext, PracticeArea};

/// Severity of a single disclosure gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GapSeverity {
    #[default]
    Minor,
    Material,
    /// The missing material goes to the foundation of the opposing case.
    Foundational,
}

impl GapSeverity {
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "minor" => Some(Self::Minor),
            "material" => Some(Self::Material),
            "foundational" => Some(Self::Foundational),
            _ => None,
        }
    }
}

/// One item the opposing side has failed to disclose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisclosureGap {
    pub item: String,
    pub severity: GapSeverity,
    pub days_overdue: Option<u32>,
}

/// One item in the evidence graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub label: String,
    pub category: Option<String>,
    /// Whether chain of custody / continuity is confirmed. None = unknown.
    pub continuity_confirmed: Option<bool>,
    /// Whether this item is foundational to the opposing case.
    pub foundational: bool,
}

/// The charge as recorded on the charge sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeInfo {
    pub offence: String,
    pub statutory_basis: Option<String>,
}

/// Procedural compliance record for a criminal matter.
///
/// Every flag is `Option<bool>`: `None` means the fact was not
/// established upstream and is treated as not proven.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceRecord {
    pub solicitor_present: Option<bool>,
    pub interview_recorded: Option<bool>,
    pub rights_given: Option<bool>,
    pub caution_given: Option<bool>,
    pub custody_log_complete: Option<bool>,
    pub detention_hours: Option<u32>,
}

/// Validated facts for a criminal matter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriminalFacts {
    pub charge: Option<ChargeInfo>,
    pub compliance: ComplianceRecord,
    pub evidence_items: Vec<EvidenceItem>,
    pub disclosure_gaps: Vec<DisclosureGap>,
}

/// Validated facts for a civil matter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CivilFacts {
    pub limitation_expired: Option<bool>,
    pub directions_days_overdue: Option<u32>,
    pub expert_report_served: Option<bool>,
    pub quantum_disputed: Option<bool>,
    pub disclosure_gaps: Vec<DisclosureGap>,
}

/// Validated facts for a family matter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FamilyFacts {
    pub welfare_report_present: Option<bool>,
    pub safeguarding_complete: Option<bool>,
    pub disclosure_gaps: Vec<DisclosureGap>,
}

/// Validated facts for a matter with no specialised rule set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralFacts {
    pub evidence_items: Vec<EvidenceItem>,
    pub disclosure_gaps: Vec<DisclosureGap>,
}

/// Discriminated union of per-practice-area fact schemas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "area", rename_all = "snake_case")]
pub enum CaseFacts {
    Criminal(CriminalFacts),
    Civil(CivilFacts),
    Family(FamilyFacts),
    General(GeneralFacts),
}

/// Result of boundary validation: the typed facts plus any warnings
/// recorded for absent or malformed upstream fields.
#[derive(Debug, Clone)]
pub struct ValidatedCase {
    pub facts: CaseFacts,
    pub warnings: Vec<String>,
}

impl CaseFacts {
    /// Validate the raw snapshot metadata into the typed union.
    /// Never fails: malformed fields default and are recorded as warnings.
    pub fn validate(ctx: &CaseContext) -> ValidatedCase {
        let mut reader = FieldReader::new(&ctx.metadata);
        let facts = match ctx.practice_area {
            PracticeArea::Criminal => CaseFacts::Criminal(CriminalFacts {
                charge: reader.charge(),
                compliance: reader.compliance(),
                evidence_items: reader.evidence_items(),
                disclosure_gaps: reader.disclosure_gaps(),
            }),
            PracticeArea::Civil => CaseFacts::Civil(CivilFacts {
                limitation_expired: reader.bool_field("limitation_expired"),
                directions_days_overdue: reader.u32_field("directions_days_overdue"),
                expert_report_served: reader.bool_field("expert_report_served"),
                quantum_disputed: reader.bool_field("quantum_disputed"),
                disclosure_gaps: reader.disclosure_gaps(),
            }),
            PracticeArea::Family => CaseFacts::Family(FamilyFacts {
                welfare_report_present: reader.bool_field("welfare_report_present"),
                safeguarding_complete: reader.bool_field("safeguarding_complete"),
                disclosure_gaps: reader.disclosure_gaps(),
            }),
            PracticeArea::General => CaseFacts::General(GeneralFacts {
                evidence_items: reader.evidence_items(),
                disclosure_gaps: reader.disclosure_gaps(),
            }),
        };
        ValidatedCase {
            facts,
            warnings: reader.warnings,
        }
    }

    /// Disclosure gaps regardless of practice area.
    pub fn disclosure_gaps(&self) -> &[DisclosureGap] {
        match self {
            Self::Criminal(f) => &f.disclosure_gaps,
            Self::Civil(f) => &f.disclosure_gaps,
            Self::Family(f) => &f.disclosure_gaps,
            Self::General(f) => &f.disclosure_gaps,
        }
    }

    /// Evidence graph items, where the schema carries them.
    pub fn evidence_items(&self) -> &[EvidenceItem] {
        match self {
            Self::Criminal(f) => &f.evidence_items,
            Self::General(f) => &f.evidence_items,
            _ => &[],
        }
    }

    /// Compliance record for criminal matters, default otherwise.
    pub fn compliance(&self) -> ComplianceRecord {
        match self {
            Self::Criminal(f) => f.compliance.clone(),
            _ => ComplianceRecord::default(),
        }
    }
}

/// Walks the raw metadata JSON, recording a warning for every field that
/// is present but not of the expected shape.
struct FieldReader<'a> {
    root: &'a Value,
    warnings: Vec<String>,
}

impl<'a> FieldReader<'a> {
    fn new(root: &'a Value) -> Self {
        Self {
            root,
            warnings: Vec::new(),
        }
    }

    fn field(&self, name: &str) -> Option<&'a Value> {
        self.root.get(name)
    }

    fn bool_field(&mut self, name: &str) -> Option<bool> {
        match self.field(name) {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                self.warn_malformed(name, "boolean");
                None
            }
        }
    }

    fn u32_field(&mut self, name: &str) -> Option<u32> {
        let value = self.field(name);
        read_u32(value, name, &mut self.warnings)
    }

    fn charge(&mut self) -> Option<ChargeInfo> {
        let value = self.field("charge")?;
        let Some(obj) = value.as_object() else {
            if !value.is_null() {
                self.warn_malformed("charge", "object");
            }
            return None;
        };
        let offence = match obj.get("offence").and_then(Value::as_str) {
            Some(s) => s.to_string(),
            None => {
                self.warn_malformed("charge.offence", "string");
                return None;
            }
        };
        Some(ChargeInfo {
            offence,
            statutory_basis: obj
                .get("statutory_basis")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    fn compliance(&mut self) -> ComplianceRecord {
        let Some(value) = self.field("compliance") else {
            return ComplianceRecord::default();
        };
        let Some(obj) = value.as_object() else {
            if !value.is_null() {
                self.warn_malformed("compliance", "object");
            }
            return ComplianceRecord::default();
        };
        let mut read_bool = |name: &str, warnings: &mut Vec<String>| match obj.get(name) {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                warnings.push(malformed_warning(&format!("compliance.{name}"), "boolean"));
                None
            }
        };
        let mut warnings = Vec::new();
        let record = ComplianceRecord {
            solicitor_present: read_bool("solicitor_present", &mut warnings),
            interview_recorded: read_bool("interview_recorded", &mut warnings),
            rights_given: read_bool("rights_given", &mut warnings),
            caution_given: read_bool("caution_given", &mut warnings),
            custody_log_complete: read_bool("custody_log_complete", &mut warnings),
            detention_hours: read_u32(
                obj.get("detention_hours"),
                "compliance.detention_hours",
                &mut warnings,
            ),
        };
        self.warnings.extend(warnings);
        record
    }

    fn evidence_items(&mut self) -> Vec<EvidenceItem> {
        let Some(value) = self.field("evidence") else {
            return Vec::new();
        };
        let Some(entries) = value.as_array() else {
            if !value.is_null() {
                self.warn_malformed("evidence", "array");
            }
            return Vec::new();
        };
        let mut items = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let Some(obj) = entry.as_object() else {
                self.warn_malformed(&format!("evidence[{idx}]"), "object");
                continue;
            };
            let Some(label) = obj.get("label").and_then(Value::as_str) else {
                self.warn_malformed(&format!("evidence[{idx}].label"), "string");
                continue;
            };
            items.push(EvidenceItem {
                label: label.to_string(),
                category: obj.get("category").and_then(Value::as_str).map(str::to_string),
                continuity_confirmed: obj.get("continuity_confirmed").and_then(Value::as_bool),
                foundational: obj
                    .get("foundational")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            });
        }
        items
    }

    fn disclosure_gaps(&mut self) -> Vec<DisclosureGap> {
        let Some(value) = self.field("disclosure_gaps") else {
            return Vec::new();
        };
        let Some(entries) = value.as_array() else {
            if !value.is_null() {
                self.warn_malformed("disclosure_gaps", "array");
            }
            return Vec::new();
        };
        let mut gaps = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let Some(obj) = entry.as_object() else {
                self.warn_malformed(&format!("disclosure_gaps[{idx}]"), "object");
                continue;
            };
            let Some(item) = obj.get("item").and_then(Value::as_str) else {
                self.warn_malformed(&format!("disclosure_gaps[{idx}].item"), "string");
                continue;
            };
            let severity = match obj.get("severity").and_then(Value::as_str) {
                Some(s) => GapSeverity::parse_str(s).unwrap_or_else(|| {
                    self.warnings.push(malformed_warning(
                        &format!("disclosure_gaps[{idx}].severity"),
                        "minor|material|foundational",
                    ));
                    GapSeverity::Minor
                }),
                None => GapSeverity::Minor,
            };
            let days_overdue = read_u32(
                obj.get("days_overdue"),
                &format!("disclosure_gaps[{idx}].days_overdue"),
                &mut self.warnings,
            );
            gaps.push(DisclosureGap {
                item: item.to_string(),
                severity,
                days_overdue,
            });
        }
        gaps
    }

    fn warn_malformed(&mut self, field: &str, expected: &str) {
        self.warnings.push(malformed_warning(field, expected));
    }
}

fn malformed_warning(field: &str, expected: &str) -> String {
    format!("metadata field `{field}` is not a {expected}; treated as not proven")
}

/// Read a count field. Negative, fractional, and non-numeric values are
/// all malformed and warn; absent or null means unknown.
fn read_u32(value: Option<&Value>, field: &str, warnings: &mut Vec<String>) -> Option<u32> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) => Some(v.min(u32::MAX as u64) as u32),
            None => {
                warnings.push(malformed_warning(field, "non-negative integer"));
                None
            }
        },
        Some(_) => {
            warnings.push(malformed_warning(field, "non-negative integer"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::case::Document;
    use serde_json::json;

    #[test]
    fn test_missing_metadata_defaults_without_warnings() {
        let ctx = CaseContext::new(vec![Document::from_text("x")], PracticeArea::Criminal);
        let validated = CaseFacts::validate(&ctx);
        assert!(validated.warnings.is_empty());
        let CaseFacts::Criminal(facts) = validated.facts else {
            panic!("expected criminal facts");
        };
        assert!(facts.charge.is_none());
        assert_eq!(facts.compliance.solicitor_present, None);
        assert!(facts.disclosure_gaps.is_empty());
    }

    #[test]
    fn test_malformed_fields_warn_and_default() {
        let ctx = CaseContext::new(vec![Document::from_text("x")], PracticeArea::Civil)
            .with_metadata(json!({
                "limitation_expired": "yes",
                "directions_days_overdue": 14,
            }));
        let validated = CaseFacts::validate(&ctx);
        assert_eq!(validated.warnings.len(), 1);
        let CaseFacts::Civil(facts) = validated.facts else {
            panic!("expected civil facts");
        };
        assert_eq!(facts.limitation_expired, None, "malformed bool defaults to not proven");
        assert_eq!(facts.directions_days_overdue, Some(14));
    }

    #[test]
    fn test_disclosure_gaps_parsed_with_severity() {
        let ctx = CaseContext::new(vec![Document::from_text("x")], PracticeArea::Criminal)
            .with_metadata(json!({
                "disclosure_gaps": [
                    { "item": "CCTV schedule", "severity": "foundational", "days_overdue": 21 },
                    { "item": "Phone download", "severity": "bogus" },
                    "not an object",
                ],
            }));
        let validated = CaseFacts::validate(&ctx);
        let gaps = validated.facts.disclosure_gaps();
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].severity, GapSeverity::Foundational);
        assert_eq!(gaps[0].days_overdue, Some(21));
        assert_eq!(gaps[1].severity, GapSeverity::Minor, "unknown severity defaults to minor");
        assert_eq!(validated.warnings.len(), 2);
    }

    #[test]
    fn test_malformed_numeric_fields_warn_and_default() {
        let ctx = CaseContext::new(vec![Document::from_text("x")], PracticeArea::Criminal)
            .with_metadata(json!({
                "compliance": { "detention_hours": "30" },
                "disclosure_gaps": [
                    { "item": "cctv", "days_overdue": -4 },
                ],
            }));
        let validated = CaseFacts::validate(&ctx);
        assert_eq!(validated.warnings.len(), 2);
        assert!(validated
            .warnings
            .iter()
            .any(|w| w.contains("compliance.detention_hours")));
        assert!(validated
            .warnings
            .iter()
            .any(|w| w.contains("disclosure_gaps[0].days_overdue")));
        assert_eq!(validated.facts.compliance().detention_hours, None);
        assert_eq!(validated.facts.disclosure_gaps()[0].days_overdue, None);
    }

    #[test]
    fn test_fractional_count_warns() {
        let ctx = CaseContext::new(vec![Document::from_text("x")], PracticeArea::Civil)
            .with_metadata(json!({ "directions_days_overdue": 3.5 }));
        let validated = CaseFacts::validate(&ctx);
        assert_eq!(validated.warnings.len(), 1);
        let CaseFacts::Civil(facts) = validated.facts else {
            panic!("expected civil facts");
        };
        assert_eq!(facts.directions_days_overdue, None);
    }

    #[test]
    fn test_compliance_record_partial() {
        let ctx = CaseContext::new(vec![Document::from_text("x")], PracticeArea::Criminal)
            .with_metadata(json!({
                "compliance": {
                    "solicitor_present": false,
                    "interview_recorded": true,
                    "detention_hours": 30,
                },
            }));
        let validated = CaseFacts::validate(&ctx);
        let compliance = validated.facts.compliance();
        assert_eq!(compliance.solicitor_present, Some(false));
        assert_eq!(compliance.interview_recorded, Some(true));
        assert_eq!(compliance.rights_given, None);
        assert_eq!(compliance.detention_hours, Some(30));
    }
}
