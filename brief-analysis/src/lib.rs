//! # brief-analysis
//!
//! Assessment engine for the Brief case analysis tool.
//! Contains the corpus builder, the text/completeness/visibility gates,
//! the evidence strength analyzer, the angle rule sets, the calibration
//! engine, the strategy ranker/combiner, and the pipeline orchestrator.

pub mod angles;
pub mod cache;
pub mod calibration;
pub mod corpus;
pub mod evidence;
pub mod gates;
pub mod pipeline;
pub mod strategy;
