//! The three safety gates: text sufficiency, bundle completeness, and
//! probability visibility.

pub mod completeness;
pub mod text_sufficiency;
pub mod visibility;
