//! Shared type definitions for the assessment engine.

pub mod case;
pub mod collections;
pub mod evidence;
pub mod facts;
pub mod report;
