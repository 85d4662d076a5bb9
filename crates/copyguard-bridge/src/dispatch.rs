//! Request dispatch
//!
//! One request is handled to completion before the next is read; every
//! suspension point (store IO, typeface loads, pacing sleeps) happens
//! inside that window, which is what makes the store's read-modify-write
//! safe.

use anyhow::Result;
use copyguard_core::DecisionState;
use copyguard_engine::Engine;
use copyguard_host::DocumentHost;
use tracing::debug;

use crate::protocol::{UiEvent, UiRequest};

/// Outbound event channel back to the UI.
pub trait UiSink {
    fn send(&mut self, event: UiEvent) -> Result<()>;
}

/// Shown when a selection scan is requested with nothing selected.
pub const EMPTY_SELECTION_MESSAGE: &str = "Select at least one frame or text layer.";

pub async fn handle_request<H: DocumentHost>(
    engine: &mut Engine<H>,
    request: UiRequest,
    sink: &mut impl UiSink,
) -> Result<()> {
    match request {
        UiRequest::UpdateTracking { enabled } => {
            engine.set_tracking(enabled);
        }
        UiRequest::ScanSelection { forbidden_terms } => {
            let units = engine.selection_units().await?;
            if units.is_empty() {
                sink.send(UiEvent::ScanFinished {
                    matches: Vec::new(),
                    message: Some(EMPTY_SELECTION_MESSAGE.to_string()),
                })?;
                return Ok(());
            }

            sink.send(UiEvent::ScanStarted)?;
            let matches = engine.scan_selection(&units, &forbidden_terms).await?;
            sink.send(UiEvent::ScanFinished {
                matches,
                message: None,
            })?;
        }
        UiRequest::ScanAll {
            forbidden_terms,
            tracking,
        } => {
            sink.send(UiEvent::ScanStarted)?;
            let units = engine.document_units().await?;
            let matches = engine.scan_document(&units, &forbidden_terms, tracking).await?;
            sink.send(UiEvent::ScanFinished {
                matches,
                message: None,
            })?;
        }
        UiRequest::GotoUnit { unit_id } => {
            engine.goto(&unit_id).await?;
        }
        UiRequest::ClearMemory => {
            engine.clear_memory().await?;
            sink.send(UiEvent::MemoryCleared)?;
        }
        UiRequest::SkipMatch { unit_id, term } => {
            engine.skip(&unit_id, &term).await?;
            sink.send(UiEvent::DecisionSaved {
                unit_id,
                term,
                decision: DecisionState::Skipped,
                new_term: None,
            })?;
        }
        UiRequest::MarkResolved { unit_id, term } => {
            engine.mark_resolved(&unit_id, &term).await?;
            sink.send(UiEvent::DecisionSaved {
                unit_id,
                term,
                decision: DecisionState::Resolved,
                new_term: None,
            })?;
        }
        UiRequest::ReplaceText {
            unit_id,
            old_term,
            new_term,
        } => {
            if engine.replace(&unit_id, &old_term, &new_term).await?.is_some() {
                sink.send(UiEvent::DecisionSaved {
                    unit_id,
                    term: old_term,
                    decision: DecisionState::Replaced,
                    new_term: Some(new_term),
                })?;
            } else {
                debug!(unit_id = %unit_id, "replace target not found");
            }
        }
    }

    Ok(())
}
