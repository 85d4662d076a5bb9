//! Scan orchestration and match actions
//!
//! One engine instance serves one document host. Requests are handled to
//! completion one at a time (see the bridge crate); the decision store's
//! whole-mapping read-modify-write relies on that.

use std::time::Duration;

use anyhow::Result;
use copyguard_core::{DecisionMap, DecisionState, MatchResult, ScanScope, TextUnit};
use copyguard_host::DocumentHost;
use copyguard_match::{find_all_matches, find_first_match, normalize_terms, replace_term};
use copyguard_store::{DecisionStore, StorageBackend, storage_key};
use tokio::time::sleep;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Cosmetic pacing so host-side UI feedback can keep up; zeroed in tests.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// Delay between announcing a scan and starting it.
    pub scan_start: Duration,
    /// Per-unit delay while the viewport follows a tracked full scan.
    pub track: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            scan_start: Duration::from_millis(100),
            track: Duration::from_millis(1000),
        }
    }
}

impl Pacing {
    pub fn none() -> Self {
        Self {
            scan_start: Duration::ZERO,
            track: Duration::ZERO,
        }
    }
}

/// Per-session UI state, owned by the engine rather than a process-wide
/// flag so sessions stay independent.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub tracking: bool,
}

/// Engine construction options.
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    /// Partition decision memory per document.
    pub namespaced: bool,
    pub pacing: Pacing,
    /// Initial viewport-tracking state.
    pub tracking: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            namespaced: true,
            pacing: Pacing::default(),
            tracking: true,
        }
    }
}

pub struct Engine<H> {
    host: H,
    store: DecisionStore,
    pacing: Pacing,
    session: Session,
}

impl<H: DocumentHost> Engine<H> {
    /// Build an engine over a host and storage backend, resolving the
    /// decision storage key. With namespacing on, the document's namespace
    /// id is generated on first use and persisted through the host.
    pub async fn new(host: H, backend: Box<dyn StorageBackend>, options: EngineOptions) -> Result<Self> {
        let namespace = if options.namespaced {
            Some(resolve_namespace(&host).await?)
        } else {
            None
        };
        let store = DecisionStore::new(backend, storage_key(namespace.as_deref()));

        Ok(Self {
            host,
            store,
            pacing: options.pacing,
            session: Session {
                tracking: options.tracking,
            },
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn tracking(&self) -> bool {
        self.session.tracking
    }

    pub fn set_tracking(&mut self, enabled: bool) {
        self.session.tracking = enabled;
    }

    pub async fn selection_units(&self) -> Result<Vec<TextUnit>> {
        Ok(self.host.list_text_units(ScanScope::Selection).await?)
    }

    pub async fn document_units(&self) -> Result<Vec<TextUnit>> {
        Ok(self.host.list_text_units(ScanScope::Document).await?)
    }

    /// First-match scan over the given units: at most one result per unit.
    /// Already-resolved (unit, term) pairs are filtered out before
    /// matching, so a later term can still surface.
    ///
    /// An empty normalized term list is valid input and yields an empty
    /// result list.
    pub async fn scan_selection(&self, units: &[TextUnit], raw_terms: &str) -> Result<Vec<MatchResult>> {
        sleep(self.pacing.scan_start).await;

        let terms = normalize_terms(raw_terms);
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        let decisions = self.store.load().await?;

        let mut matches = Vec::new();
        for unit in units {
            let candidates = open_terms(&terms, &decisions, &unit.id);
            if let Some(term) = find_first_match(&unit.content, &candidates) {
                matches.push(MatchResult::new(unit, term));
            }
        }

        info!(units = units.len(), matches = matches.len(), "selection scan finished");
        Ok(matches)
    }

    /// Full-document scan: every open (unit, term) pair becomes its own
    /// result so each can be skipped or replaced independently. The
    /// session tracking flag is taken from the request; with tracking on,
    /// the viewport follows each unit as it is processed.
    pub async fn scan_document(
        &mut self,
        units: &[TextUnit],
        raw_terms: &str,
        tracking: bool,
    ) -> Result<Vec<MatchResult>> {
        self.session.tracking = tracking;
        sleep(self.pacing.scan_start).await;

        let terms = normalize_terms(raw_terms);
        let decisions = if terms.is_empty() {
            DecisionMap::new()
        } else {
            self.store.load().await?
        };

        let mut matches = Vec::new();
        for unit in units {
            if !terms.is_empty() {
                let candidates = open_terms(&terms, &decisions, &unit.id);
                for term in find_all_matches(&unit.content, &candidates) {
                    matches.push(MatchResult::new(unit, term));
                }
            }

            if self.session.tracking {
                self.host.focus_unit(&unit.id).await?;
                sleep(self.pacing.track).await;
            } else {
                tokio::task::yield_now().await;
            }
        }

        info!(units = units.len(), matches = matches.len(), "document scan finished");
        Ok(matches)
    }

    /// Record a terminal decision for the pair without touching the
    /// document.
    pub async fn skip(&self, unit_id: &str, term: &str) -> Result<()> {
        self.store.record(unit_id, term, DecisionState::Skipped).await?;
        Ok(())
    }

    pub async fn mark_resolved(&self, unit_id: &str, term: &str) -> Result<()> {
        self.store.record(unit_id, term, DecisionState::Resolved).await?;
        Ok(())
    }

    /// Replace every occurrence of `term` in the unit and record the
    /// decision. Returns the updated content, or `None` when the unit does
    /// not exist.
    pub async fn replace(&self, unit_id: &str, term: &str, replacement: &str) -> Result<Option<String>> {
        let Some(unit) = self.host.text_unit(unit_id).await? else {
            debug!(unit_id, "replace target missing, ignoring");
            return Ok(None);
        };

        self.load_typefaces(unit_id).await;

        let updated = replace_term(&unit.content, term, replacement)?;
        self.host.set_content(unit_id, &updated).await?;
        self.store.record(unit_id, term, DecisionState::Replaced).await?;

        info!(unit_id, term, "term replaced");
        Ok(Some(updated))
    }

    /// Scoped typeface load before mutation: every distinct run typeface,
    /// or a best-effort single base face when run-level enumeration is
    /// unavailable or a load fails. Failures are absorbed here; an
    /// unloaded face surfaces when the host rejects the mutation.
    async fn load_typefaces(&self, unit_id: &str) {
        if let Err(e) = self.load_run_typefaces(unit_id).await {
            debug!(unit_id, error = %e, "run typeface load failed, falling back to base face");
            if let Err(e) = self.load_base_typeface(unit_id).await {
                warn!(unit_id, error = %e, "base typeface load failed");
            }
        }
    }

    async fn load_run_typefaces(&self, unit_id: &str) -> copyguard_host::Result<()> {
        for face in self.host.typefaces_of(unit_id).await? {
            self.host.load_typeface(&face).await?;
        }
        Ok(())
    }

    async fn load_base_typeface(&self, unit_id: &str) -> copyguard_host::Result<()> {
        let face = self.host.primary_typeface(unit_id).await?;
        self.host.load_typeface(&face).await
    }

    /// Select the unit and bring it into view. Unknown ids are ignored.
    pub async fn goto(&self, unit_id: &str) -> Result<()> {
        self.host.focus_unit(unit_id).await?;
        Ok(())
    }

    /// Drop the entire decision mapping for this document's storage key.
    pub async fn clear_memory(&self) -> Result<()> {
        self.store.clear().await?;
        info!("decision memory cleared");
        Ok(())
    }

    /// Current decision mapping, for inspection.
    pub async fn decisions(&self) -> Result<DecisionMap> {
        Ok(self.store.load().await?)
    }
}

/// Terms with no recorded decision for this unit, in input order.
fn open_terms(terms: &[String], decisions: &DecisionMap, unit_id: &str) -> Vec<String> {
    terms
        .iter()
        .filter(|term| !decisions.is_resolved(unit_id, term))
        .cloned()
        .collect()
}

async fn resolve_namespace<H: DocumentHost>(host: &H) -> Result<String> {
    if let Some(namespace) = host.document_namespace().await? {
        return Ok(namespace);
    }
    let namespace = Uuid::new_v4().to_string();
    host.set_document_namespace(&namespace).await?;
    debug!(namespace = %namespace, "assigned document namespace");
    Ok(namespace)
}
