//! The canonical threshold table.
//!
//! Every numeric cutoff the engine uses lives here, once. The original
//! rule implementations this engine replaces carried inconsistent
//! duplicated constants; this table is the single source and is
//! TOML-overridable field by field.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::case::PracticeArea;

/// Raw, partially-specified threshold overrides as loaded from TOML.
/// Unset fields fall back to the canonical defaults via `resolve()`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Minimum total raw characters before the text gate passes.
    pub min_total_chars: Option<usize>,
    /// Average chars/document below which documents look scanned.
    pub scanned_avg_chars: Option<usize>,
    /// Overall strength at or above which heavy calibration applies.
    pub high_strength: Option<u8>,
    /// Overall strength at or above which light calibration applies.
    pub moderate_strength: Option<u8>,
    /// Minimum bundle completeness (%) per practice area for showing
    /// numeric probabilities.
    pub min_completeness_criminal: Option<u8>,
    pub min_completeness_civil: Option<u8>,
    pub min_completeness_family: Option<u8>,
    pub min_completeness_general: Option<u8>,
    /// Critical-missing count at or above which probabilities are hidden.
    pub max_critical_missing: Option<u32>,
    /// Probability bar for an angle to count as critical.
    pub critical_probability_bar: Option<u8>,
    /// Probability bar for an angle to qualify as supporting.
    pub supporting_probability_bar: Option<u8>,
}

impl ThresholdConfig {
    /// Parse from a TOML string.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Load from a TOML file.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn effective_min_total_chars(&self) -> usize {
        self.min_total_chars.unwrap_or(200)
    }

    pub fn effective_scanned_avg_chars(&self) -> usize {
        self.scanned_avg_chars.unwrap_or(120)
    }

    pub fn effective_high_strength(&self) -> u8 {
        self.high_strength.unwrap_or(75)
    }

    pub fn effective_moderate_strength(&self) -> u8 {
        self.moderate_strength.unwrap_or(55)
    }

    /// Validate and freeze into the resolved table.
    pub fn resolve(&self) -> Result<Thresholds, ConfigError> {
        let high = self.effective_high_strength();
        let moderate = self.effective_moderate_strength();
        if moderate >= high {
            return Err(ConfigError::InvalidThreshold {
                field: "moderate_strength",
                reason: format!("moderate ({moderate}) must be below high ({high})"),
            });
        }
        if high > 100 {
            return Err(ConfigError::InvalidThreshold {
                field: "high_strength",
                reason: format!("{high} exceeds 100"),
            });
        }
        let check_pct = |field: &'static str, value: u8| {
            if value > 100 {
                Err(ConfigError::InvalidThreshold {
                    field,
                    reason: format!("{value} exceeds 100"),
                })
            } else {
                Ok(value)
            }
        };
        let defaults = Thresholds::default();
        Ok(Thresholds {
            min_total_chars: self.effective_min_total_chars(),
            scanned_avg_chars: self.effective_scanned_avg_chars(),
            high_strength: high,
            moderate_strength: moderate,
            min_completeness_criminal: check_pct(
                "min_completeness_criminal",
                self.min_completeness_criminal
                    .unwrap_or(defaults.min_completeness_criminal),
            )?,
            min_completeness_civil: check_pct(
                "min_completeness_civil",
                self.min_completeness_civil
                    .unwrap_or(defaults.min_completeness_civil),
            )?,
            min_completeness_family: check_pct(
                "min_completeness_family",
                self.min_completeness_family
                    .unwrap_or(defaults.min_completeness_family),
            )?,
            min_completeness_general: check_pct(
                "min_completeness_general",
                self.min_completeness_general
                    .unwrap_or(defaults.min_completeness_general),
            )?,
            max_critical_missing: self
                .max_critical_missing
                .unwrap_or(defaults.max_critical_missing),
            critical_probability_bar: check_pct(
                "critical_probability_bar",
                self.critical_probability_bar
                    .unwrap_or(defaults.critical_probability_bar),
            )?,
            supporting_probability_bar: check_pct(
                "supporting_probability_bar",
                self.supporting_probability_bar
                    .unwrap_or(defaults.supporting_probability_bar),
            )?,
            ..defaults
        })
    }
}

/// The resolved, validated threshold table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_total_chars: usize,
    pub scanned_avg_chars: usize,
    pub high_strength: u8,
    pub moderate_strength: u8,
    /// Heavy calibration: scale and floor applied at high strength.
    pub high_scale: f64,
    pub high_floor: u8,
    /// Light calibration: scale and floor applied at moderate strength.
    pub moderate_scale: f64,
    pub moderate_floor: u8,
    /// Directive override: scale and floor for undermined angle types.
    pub override_scale: f64,
    pub override_floor: u8,
    pub min_completeness_criminal: u8,
    pub min_completeness_civil: u8,
    pub min_completeness_family: u8,
    pub min_completeness_general: u8,
    pub max_critical_missing: u32,
    pub critical_probability_bar: u8,
    pub supporting_probability_bar: u8,
    /// Diminishing-returns constant for the strategy combiner.
    pub combiner_dampening: f64,
    pub combined_probability_cap: u8,
    /// Used when the angle list is somehow empty.
    pub neutral_probability: u8,
    /// Cap on critical angles in the report.
    pub max_critical_angles: usize,
    /// Cap on supporting angles in the recommended strategy.
    pub max_supporting_angles: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_total_chars: 200,
            scanned_avg_chars: 120,
            high_strength: 75,
            moderate_strength: 55,
            high_scale: 0.40,
            high_floor: 20,
            moderate_scale: 0.60,
            moderate_floor: 30,
            override_scale: 0.30,
            override_floor: 15,
            min_completeness_criminal: 60,
            min_completeness_civil: 50,
            min_completeness_family: 50,
            min_completeness_general: 40,
            max_critical_missing: 2,
            critical_probability_bar: 65,
            supporting_probability_bar: 55,
            combiner_dampening: 0.3,
            combined_probability_cap: 95,
            neutral_probability: 50,
            max_critical_angles: 5,
            max_supporting_angles: 3,
        }
    }
}

impl Thresholds {
    /// Minimum completeness percentage for the given practice area.
    pub fn min_completeness(&self, area: PracticeArea) -> u8 {
        match area {
            PracticeArea::Criminal => self.min_completeness_criminal,
            PracticeArea::Civil => self.min_completeness_civil,
            PracticeArea::Family => self.min_completeness_family,
            PracticeArea::General => self.min_completeness_general,
        }
    }
}

/// Top-level engine configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub thresholds: ThresholdConfig,
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BriefErrorCode;

    #[test]
    fn test_defaults_resolve() {
        let thresholds = ThresholdConfig::default().resolve().unwrap();
        assert_eq!(thresholds.min_total_chars, 200);
        assert_eq!(thresholds.high_strength, 75);
        assert_eq!(thresholds.min_completeness(PracticeArea::Criminal), 60);
        assert_eq!(thresholds.min_completeness(PracticeArea::General), 40);
    }

    #[test]
    fn test_toml_overrides() {
        let config = EngineConfig::from_toml_str(
            r#"
            [thresholds]
            min_total_chars = 500
            min_completeness_criminal = 70
            "#,
        )
        .unwrap();
        let thresholds = config.thresholds.resolve().unwrap();
        assert_eq!(thresholds.min_total_chars, 500);
        assert_eq!(thresholds.min_completeness_criminal, 70);
        // Everything else stays canonical.
        assert_eq!(thresholds.moderate_strength, 55);
    }

    #[test]
    fn test_inverted_strength_thresholds_rejected() {
        let config = ThresholdConfig {
            high_strength: Some(50),
            moderate_strength: Some(60),
            ..Default::default()
        };
        let err = config.resolve().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_INVALID_THRESHOLD");
    }

    #[test]
    fn test_out_of_range_percentage_rejected() {
        let config = ThresholdConfig {
            min_completeness_civil: Some(130),
            ..Default::default()
        };
        assert!(config.resolve().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.toml");
        std::fs::write(
            &path,
            "[thresholds]\nscanned_avg_chars = 80\nmax_critical_missing = 3\n",
        )
        .unwrap();
        let thresholds = EngineConfig::load(&path).unwrap().thresholds.resolve().unwrap();
        assert_eq!(thresholds.scanned_avg_chars, 80);
        assert_eq!(thresholds.max_critical_missing, 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineConfig::load(std::path::Path::new("/nonexistent/brief.toml")).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_IO_ERROR");
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = ThresholdConfig::from_toml_str("min_total_chars = \"many\"").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_PARSE_ERROR");
    }
}
