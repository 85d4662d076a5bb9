//! Decision store
//!
//! A thin read-modify-write layer over one storage key. Callers dispatch
//! requests one at a time, so no second store operation can interleave
//! with the load/persist pair; concurrent writers would need a
//! compare-and-swap or per-key upsert at this boundary instead.

use copyguard_core::{Decision, DecisionMap, DecisionState};
use tracing::{debug, warn};

use crate::{Result, StorageBackend};

/// Key suffix shared by all decision mappings.
const DECISIONS_KEY: &str = "decisions";

/// Storage key for a document namespace. Namespaced documents get their
/// own partition; without a namespace every document shares one mapping.
pub fn storage_key(namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) => format!("{ns}:{DECISIONS_KEY}"),
        None => DECISIONS_KEY.to_string(),
    }
}

/// Persistent (unit, term) decision memory bound to one storage key.
pub struct DecisionStore {
    backend: Box<dyn StorageBackend>,
    key: String,
}

impl DecisionStore {
    pub fn new(backend: Box<dyn StorageBackend>, key: String) -> Self {
        Self { backend, key }
    }

    /// Load the current mapping. Absent or unreadable payloads yield an
    /// empty mapping rather than an error.
    pub async fn load(&self) -> Result<DecisionMap> {
        match self.backend.read(&self.key).await? {
            None => Ok(DecisionMap::new()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(map) => Ok(map),
                Err(e) => {
                    warn!(key = %self.key, error = %e, "unreadable decision mapping, starting empty");
                    Ok(DecisionMap::new())
                }
            },
        }
    }

    /// Record one decision, overwriting any earlier state for the pair.
    pub async fn record(&self, unit_id: &str, term: &str, state: DecisionState) -> Result<()> {
        let mut map = self.load().await?;
        map.insert(unit_id, term, Decision::now(state));
        self.persist(&map).await?;
        debug!(unit_id, term, state = state.as_str(), "decision recorded");
        Ok(())
    }

    /// Drop every recorded decision under this storage key.
    pub async fn clear(&self) -> Result<()> {
        self.persist(&DecisionMap::new()).await
    }

    async fn persist(&self, map: &DecisionMap) -> Result<()> {
        let raw = serde_json::to_string(map)?;
        self.backend.write(&self.key, &raw).await
    }
}
