//! In-process document host
//!
//! Serves as the concrete [`DocumentHost`] for one-shot CLI runs and
//! tests: a document fixture is a JSON tree of containers and text units.
//! The host contract is modeled faithfully where it matters to callers:
//! typefaces must be loaded before a unit's content can change, selected
//! containers expand to their nested units, and unknown ids no-op.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use copyguard_core::{ROOT_LOCATION, ScanScope, TextUnit, Typeface};
use serde::{Deserialize, Serialize};

use crate::{DocumentHost, HostError, Result};

/// Serialized document shape accepted by [`MemoryDocument::from_fixture`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFixture {
    #[serde(default)]
    pub name: String,
    /// Plugin-data slot for the persisted namespace id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Ids of selected nodes (units or containers).
    #[serde(default)]
    pub selection: Vec<String>,
    #[serde(default)]
    pub containers: Vec<ContainerFixture>,
    /// Units sitting directly on the canvas.
    #[serde(default)]
    pub units: Vec<UnitFixture>,
    /// Typefaces the host cannot load, for exercising fallback paths.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_typefaces: Vec<Typeface>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerFixture {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub units: Vec<UnitFixture>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitFixture {
    pub id: String,
    pub content: String,
    /// Typefaces used across the unit's runs; the first entry is the base
    /// face. Defaults to a single standard face.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub typefaces: Vec<Typeface>,
    /// When true the host refuses run-level typeface enumeration,
    /// modeling hosts where only the base face is visible.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub opaque_runs: bool,
}

struct UnitSlot {
    id: String,
    content: String,
    typefaces: Vec<Typeface>,
    opaque_runs: bool,
    location: String,
    container_id: Option<String>,
}

struct DocState {
    name: String,
    namespace: Option<String>,
    selection: Vec<String>,
    containers: Vec<(String, String)>,
    slots: Vec<UnitSlot>,
    missing_typefaces: Vec<Typeface>,
    loaded: HashSet<Typeface>,
    focused: Option<String>,
}

/// In-memory document host. Clones share state.
#[derive(Clone)]
pub struct MemoryDocument {
    state: Arc<Mutex<DocState>>,
}

impl MemoryDocument {
    pub fn from_fixture(fixture: DocumentFixture) -> Self {
        let mut slots = Vec::new();
        let mut containers = Vec::new();

        for container in &fixture.containers {
            containers.push((container.id.clone(), container.name.clone()));
            for unit in &container.units {
                slots.push(slot(unit, container.name.clone(), Some(container.id.clone())));
            }
        }
        for unit in &fixture.units {
            slots.push(slot(unit, ROOT_LOCATION.to_string(), None));
        }

        Self {
            state: Arc::new(Mutex::new(DocState {
                name: fixture.name,
                namespace: fixture.namespace,
                selection: fixture.selection,
                containers,
                slots,
                missing_typefaces: fixture.missing_typefaces,
                loaded: HashSet::new(),
                focused: None,
            })),
        }
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        Ok(Self::from_fixture(serde_json::from_str(raw)?))
    }

    /// Current document state as a fixture, for writing back to disk.
    pub fn snapshot(&self) -> DocumentFixture {
        let state = self.lock();
        DocumentFixture {
            name: state.name.clone(),
            namespace: state.namespace.clone(),
            selection: state.selection.clone(),
            containers: state
                .containers
                .iter()
                .map(|(id, name)| ContainerFixture {
                    id: id.clone(),
                    name: name.clone(),
                    units: state
                        .slots
                        .iter()
                        .filter(|s| s.container_id.as_deref() == Some(id))
                        .map(unit_fixture)
                        .collect(),
                })
                .collect(),
            units: state
                .slots
                .iter()
                .filter(|s| s.container_id.is_none())
                .map(unit_fixture)
                .collect(),
            missing_typefaces: state.missing_typefaces.clone(),
        }
    }

    /// Current content of a unit, if it exists.
    pub fn content_of(&self, unit_id: &str) -> Option<String> {
        let state = self.lock();
        state
            .slots
            .iter()
            .find(|s| s.id == unit_id)
            .map(|s| s.content.clone())
    }

    /// Unit last brought into view, if any.
    pub fn focused(&self) -> Option<String> {
        self.lock().focused.clone()
    }

    pub fn is_typeface_loaded(&self, face: &Typeface) -> bool {
        self.lock().loaded.contains(face)
    }

    fn lock(&self) -> MutexGuard<'_, DocState> {
        self.state.lock().unwrap()
    }
}

fn slot(unit: &UnitFixture, location: String, container_id: Option<String>) -> UnitSlot {
    let typefaces = if unit.typefaces.is_empty() {
        vec![Typeface::default()]
    } else {
        unit.typefaces.clone()
    };
    UnitSlot {
        id: unit.id.clone(),
        content: unit.content.clone(),
        typefaces,
        opaque_runs: unit.opaque_runs,
        location,
        container_id,
    }
}

fn unit_fixture(slot: &UnitSlot) -> UnitFixture {
    UnitFixture {
        id: slot.id.clone(),
        content: slot.content.clone(),
        typefaces: slot.typefaces.clone(),
        opaque_runs: slot.opaque_runs,
    }
}

fn text_unit(slot: &UnitSlot) -> TextUnit {
    TextUnit::new(slot.id.clone(), slot.content.clone(), slot.location.clone())
}

#[async_trait]
impl DocumentHost for MemoryDocument {
    async fn list_text_units(&self, scope: ScanScope) -> Result<Vec<TextUnit>> {
        let state = self.lock();
        let units = match scope {
            ScanScope::Document => state.slots.iter().map(text_unit).collect(),
            ScanScope::Selection => {
                let mut units = Vec::new();
                for selected in &state.selection {
                    if state.containers.iter().any(|(id, _)| id == selected) {
                        units.extend(
                            state
                                .slots
                                .iter()
                                .filter(|s| s.container_id.as_deref() == Some(selected.as_str()))
                                .map(text_unit),
                        );
                    } else if let Some(slot) = state.slots.iter().find(|s| &s.id == selected) {
                        units.push(text_unit(slot));
                    }
                }
                units
            }
        };
        Ok(units)
    }

    async fn text_unit(&self, unit_id: &str) -> Result<Option<TextUnit>> {
        let state = self.lock();
        Ok(state.slots.iter().find(|s| s.id == unit_id).map(text_unit))
    }

    async fn typefaces_of(&self, unit_id: &str) -> Result<Vec<Typeface>> {
        let state = self.lock();
        let slot = state
            .slots
            .iter()
            .find(|s| s.id == unit_id)
            .ok_or_else(|| HostError::UnknownUnit(unit_id.to_string()))?;
        if slot.opaque_runs {
            return Err(HostError::TypefacesUnavailable(unit_id.to_string()));
        }

        let mut faces = Vec::new();
        for face in &slot.typefaces {
            if !faces.contains(face) {
                faces.push(face.clone());
            }
        }
        Ok(faces)
    }

    async fn primary_typeface(&self, unit_id: &str) -> Result<Typeface> {
        let state = self.lock();
        let slot = state
            .slots
            .iter()
            .find(|s| s.id == unit_id)
            .ok_or_else(|| HostError::UnknownUnit(unit_id.to_string()))?;
        // Slots are normalized to carry at least one face.
        Ok(slot.typefaces[0].clone())
    }

    async fn load_typeface(&self, face: &Typeface) -> Result<()> {
        let mut state = self.lock();
        if state.missing_typefaces.contains(face) {
            return Err(HostError::TypefaceLoad {
                family: face.family.clone(),
                style: face.style.clone(),
            });
        }
        state.loaded.insert(face.clone());
        Ok(())
    }

    async fn set_content(&self, unit_id: &str, content: &str) -> Result<()> {
        let mut state = self.lock();
        let Some(index) = state.slots.iter().position(|s| s.id == unit_id) else {
            return Ok(());
        };
        let unloaded = state.slots[index]
            .typefaces
            .iter()
            .any(|face| !state.loaded.contains(face));
        if unloaded {
            return Err(HostError::TypefacesNotLoaded(unit_id.to_string()));
        }
        state.slots[index].content = content.to_string();
        Ok(())
    }

    async fn focus_unit(&self, unit_id: &str) -> Result<()> {
        let mut state = self.lock();
        if state.slots.iter().any(|s| s.id == unit_id) {
            state.selection = vec![unit_id.to_string()];
            state.focused = Some(unit_id.to_string());
        }
        Ok(())
    }

    async fn document_namespace(&self) -> Result<Option<String>> {
        Ok(self.lock().namespace.clone())
    }

    async fn set_document_namespace(&self, namespace: &str) -> Result<()> {
        self.lock().namespace = Some(namespace.to_string());
        Ok(())
    }
}
