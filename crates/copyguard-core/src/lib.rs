//! Core domain models for copyguard
//!
//! This crate contains:
//! - Document-side models (TextUnit, Typeface, ScanScope)
//! - Match reporting (MatchResult)
//! - Decision memory models (Decision, DecisionMap)

pub mod decision;
pub mod report;
pub mod unit;

pub use decision::{Decision, DecisionMap, DecisionState, decision_key};
pub use report::MatchResult;
pub use unit::{ROOT_LOCATION, ScanScope, TextUnit, Typeface};
