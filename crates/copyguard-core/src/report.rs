//! Match reporting

use serde::{Deserialize, Serialize};

use crate::TextUnit;

/// Characters kept in a match excerpt.
const EXCERPT_LEN: usize = 50;

/// One reported (text unit, term) match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub unit_id: String,
    pub excerpt: String,
    pub term: String,
    pub location: String,
}

impl MatchResult {
    pub fn new(unit: &TextUnit, term: &str) -> Self {
        Self {
            unit_id: unit.id.clone(),
            excerpt: excerpt(&unit.content),
            term: term.to_string(),
            location: unit.location.clone(),
        }
    }
}

/// First [`EXCERPT_LEN`] characters of the content, newlines collapsed to
/// spaces so the excerpt stays a single display line.
fn excerpt(content: &str) -> String {
    content
        .chars()
        .take(EXCERPT_LEN)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}
