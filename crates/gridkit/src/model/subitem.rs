//! Single cell values.

use crate::editor::EditorKind;

use super::column::ColumnId;
use super::item::ItemId;

/// One cell of an [`Item`](super::Item): a text value plus an optional
/// editor override.
///
/// The text is the value displayed and persisted. While an editor is active
/// on the sub-item the stored text is stale; the editor's in-flight value is
/// available through
/// [`GridListView::live_text`](crate::GridListView::live_text).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubItem {
    pub(crate) name: String,
    pub(crate) text: String,
    pub(crate) editor: Option<EditorKind>,
    pub(crate) owner: ItemId,
    pub(crate) column: ColumnId,
}

impl SubItem {
    /// Create an unnamed sub-item with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Give the sub-item an explicit name, unique within its item.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the column's editor kind for this cell.
    pub fn with_editor(mut self, kind: EditorKind) -> Self {
        self.editor = Some(kind);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Per-cell editor override.
    pub fn editor_kind(&self) -> Option<&EditorKind> {
        self.editor.as_ref()
    }

    /// The item that owns this sub-item.
    pub fn owner(&self) -> ItemId {
        self.owner
    }

    /// The column this sub-item belongs to.
    pub fn column(&self) -> ColumnId {
        self.column
    }

    pub(crate) fn attached(name: String, owner: ItemId, column: ColumnId) -> Self {
        Self {
            name,
            owner,
            column,
            ..Self::default()
        }
    }
}
