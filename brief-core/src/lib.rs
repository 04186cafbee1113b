//! # brief-core
//!
//! Foundation crate for the Brief case assessment engine.
//! Defines the case snapshot types, the validated facts schema, the
//! evidence and report models, the canonical threshold table, config,
//! errors, and content hashing. Every other crate in the workspace
//! depends on this.

pub mod config;
pub mod errors;
pub mod hash;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::thresholds::{EngineConfig, ThresholdConfig, Thresholds};
pub use errors::{BriefErrorCode, ConfigError};
pub use types::case::{CaseContext, Document, PracticeArea};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::evidence::{
    BundleCompleteness, CalibrationDirectives, EvidenceFactor, EvidenceFactorKind,
    EvidenceStrengthResult, GateDecision, LanguageTone, StrengthLevel,
};
pub use types::facts::{CaseFacts, ValidatedCase};
pub use types::report::{
    AngleType, DefenseAngle, Diagnostics, ReasonCode, RecommendedStrategy, Severity,
    StrategyReport,
};
