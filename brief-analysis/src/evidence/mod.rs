//! Evidence strength analysis.

pub mod analyzer;
pub mod indicators;

pub use analyzer::EvidenceAnalyzer;
