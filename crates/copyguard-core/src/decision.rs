//! Decision memory models
//!
//! A decision is a persisted resolution for one (unit, term) pair. Every
//! persisted state is terminal: once recorded, the pair is suppressed from
//! scan results until the mapping is cleared.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Terminal resolution states for a (unit, term) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionState {
    Skipped,
    Replaced,
    Resolved,
}

impl DecisionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionState::Skipped => "skipped",
            DecisionState::Replaced => "replaced",
            DecisionState::Resolved => "resolved",
        }
    }
}

/// A persisted resolution for one (unit, term) pair.
///
/// The mapping is additive-only: `recorded_at` is optional so entries
/// written before it existed still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub state: DecisionState,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub recorded_at: Option<OffsetDateTime>,
}

impl Decision {
    /// A decision stamped with the current time.
    pub fn now(state: DecisionState) -> Self {
        Self {
            state,
            recorded_at: Some(OffsetDateTime::now_utc()),
        }
    }
}

/// Mapping key for one (unit, term) pair.
pub fn decision_key(unit_id: &str, term: &str) -> String {
    format!("{unit_id}__{term}")
}

/// The full decision mapping held under one storage key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionMap(HashMap<String, Decision>);

impl DecisionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff a decision exists for the pair. All persisted states are
    /// terminal, so presence alone suppresses the match.
    pub fn is_resolved(&self, unit_id: &str, term: &str) -> bool {
        self.0.contains_key(&decision_key(unit_id, term))
    }

    pub fn get(&self, unit_id: &str, term: &str) -> Option<&Decision> {
        self.0.get(&decision_key(unit_id, term))
    }

    pub fn insert(&mut self, unit_id: &str, term: &str, decision: Decision) {
        self.0.insert(decision_key(unit_id, term), decision);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Decision)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_key_format() {
        assert_eq!(decision_key("42", "spam"), "42__spam");
    }

    #[test]
    fn test_insert_marks_resolved() {
        let mut map = DecisionMap::new();
        assert!(!map.is_resolved("42", "spam"));

        map.insert("42", "spam", Decision::now(DecisionState::Skipped));

        assert!(map.is_resolved("42", "spam"));
        assert!(!map.is_resolved("42", "scam"));
        assert!(!map.is_resolved("43", "spam"));
    }

    #[test]
    fn test_every_state_is_terminal() {
        for state in [
            DecisionState::Skipped,
            DecisionState::Replaced,
            DecisionState::Resolved,
        ] {
            let mut map = DecisionMap::new();
            map.insert("1", "term", Decision::now(state));
            assert!(map.is_resolved("1", "term"));
        }
    }

    #[test]
    fn test_overwrite_keeps_latest_state() {
        let mut map = DecisionMap::new();
        map.insert("1", "term", Decision::now(DecisionState::Skipped));
        map.insert("1", "term", Decision::now(DecisionState::Replaced));

        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("1", "term").unwrap().state,
            DecisionState::Replaced
        );
    }

    #[test]
    fn test_persisted_shape() {
        let mut map = DecisionMap::new();
        map.insert(
            "42",
            "spam",
            Decision {
                state: DecisionState::Skipped,
                recorded_at: None,
            },
        );

        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(value["42__spam"]["state"], "skipped");
    }

    #[test]
    fn test_legacy_entries_without_timestamp_deserialize() {
        let raw = r#"{"42__spam":{"state":"replaced"}}"#;
        let map: DecisionMap = serde_json::from_str(raw).unwrap();

        assert!(map.is_resolved("42", "spam"));
        assert!(map.get("42", "spam").unwrap().recorded_at.is_none());
    }
}
