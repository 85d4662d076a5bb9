//! UI wire messages
//!
//! Message kinds are kebab-case and payload fields camelCase, matching the
//! plugin UI side of the boundary.

use copyguard_core::{DecisionState, MatchResult};
use serde::{Deserialize, Serialize};

/// Inbound requests from the UI.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum UiRequest {
    UpdateTracking {
        enabled: bool,
    },
    ScanSelection {
        forbidden_terms: String,
    },
    ScanAll {
        forbidden_terms: String,
        tracking: bool,
    },
    GotoUnit {
        unit_id: String,
    },
    ClearMemory,
    SkipMatch {
        unit_id: String,
        term: String,
    },
    MarkResolved {
        unit_id: String,
        term: String,
    },
    ReplaceText {
        unit_id: String,
        old_term: String,
        new_term: String,
    },
}

/// Outbound events to the UI.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum UiEvent {
    ScanStarted,
    ScanFinished {
        matches: Vec<MatchResult>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    MemoryCleared,
    DecisionSaved {
        unit_id: String,
        term: String,
        decision: DecisionState,
        #[serde(skip_serializing_if = "Option::is_none")]
        new_term: Option<String>,
    },
}
