use serde::{Deserialize, Serialize};

/// Location label for units with no enclosing container.
pub const ROOT_LOCATION: &str = "Main Canvas";

/// An editable span of text content with a stable identifier.
///
/// Owned and mutated by the document host; copyguard only reads `content`
/// and pushes replacements back through the host boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextUnit {
    pub id: String,
    pub content: String,
    /// Name of the nearest enclosing container, or [`ROOT_LOCATION`].
    pub location: String,
}

impl TextUnit {
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            location: location.into(),
        }
    }
}

/// A typeface used by one or more runs of a text unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Typeface {
    pub family: String,
    pub style: String,
}

impl Typeface {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl Default for Typeface {
    fn default() -> Self {
        Self::new("Inter", "Regular")
    }
}

/// Which part of the document a scan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanScope {
    /// The current selection, containers expanded to their text units.
    Selection,
    /// Every text unit in the document.
    Document,
}
