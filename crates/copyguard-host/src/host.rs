//! Document host trait

use async_trait::async_trait;
use copyguard_core::{ScanScope, TextUnit, Typeface};

use crate::Result;

/// Capability interface supplied by the surrounding application.
///
/// Calls suspend but never run concurrently: the bridge dispatches one
/// request to completion at a time.
#[async_trait]
pub trait DocumentHost: Send + Sync {
    /// Text units in scope. Selection scope expands selected containers
    /// into their nested text units, in selection order.
    async fn list_text_units(&self, scope: ScanScope) -> Result<Vec<TextUnit>>;

    /// Fetch one unit by id.
    async fn text_unit(&self, unit_id: &str) -> Result<Option<TextUnit>>;

    /// Every distinct typeface used across the unit's text runs. Hosts
    /// without run-level introspection return an error; callers fall back
    /// to [`DocumentHost::primary_typeface`].
    async fn typefaces_of(&self, unit_id: &str) -> Result<Vec<Typeface>>;

    /// The unit's base typeface.
    async fn primary_typeface(&self, unit_id: &str) -> Result<Typeface>;

    /// Load a typeface. Must complete before mutating a unit that uses it.
    async fn load_typeface(&self, face: &Typeface) -> Result<()>;

    /// Overwrite a unit's content. Fails unless every typeface the unit
    /// uses has been loaded; unknown ids are a silent no-op.
    async fn set_content(&self, unit_id: &str, content: &str) -> Result<()>;

    /// Select the unit and bring it into view. Unknown ids are a no-op.
    async fn focus_unit(&self, unit_id: &str) -> Result<()>;

    /// Namespace id persisted on the document, if one was ever assigned.
    async fn document_namespace(&self) -> Result<Option<String>>;

    /// Persist the document's namespace id.
    async fn set_document_namespace(&self, namespace: &str) -> Result<()>;
}
