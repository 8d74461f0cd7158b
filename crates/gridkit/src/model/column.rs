//! Column definition.

use slotmap::new_key_type;

use crate::editor::EditorKind;

new_key_type! {
    /// Stable handle of a column inside its grid.
    pub struct ColumnId;
}

/// Sort direction shown by a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SortOrder {
    /// No indicator; items keep their insertion order.
    #[default]
    None,
    /// Ascending order (A-Z, 0-9).
    Ascending,
    /// Descending order (Z-A, 9-0).
    Descending,
}

impl SortOrder {
    /// The order a header click switches to.
    ///
    /// `None` and `Descending` go to `Ascending`; `Ascending` goes to
    /// `Descending`.
    pub fn toggled(self) -> Self {
        match self {
            Self::None | Self::Descending => Self::Ascending,
            Self::Ascending => Self::Descending,
        }
    }
}

/// A named, resizable, reorderable field of the grid.
///
/// Build one with [`Column::new`] and the `with_*` methods, then hand it to
/// [`GridListView::add_column`](crate::GridListView::add_column). An empty
/// name is replaced by a generated `ColumnN` name on insertion, and an empty
/// header text defaults to the name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    pub(crate) id: ColumnId,
    pub(crate) name: String,
    pub(crate) text: String,
    pub(crate) width: Option<u32>,
    pub(crate) sort_order: SortOrder,
    pub(crate) display_index: usize,
    pub(crate) editor: Option<EditorKind>,
}

impl Column {
    /// Create a column whose name and header text are both `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a column that receives a generated name on insertion.
    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Set the header text shown instead of the name.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the width in pixels.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Make every cell of this column editable with `kind`.
    pub fn with_editor(mut self, kind: EditorKind) -> Self {
        self.editor = Some(kind);
        self
    }

    /// Handle assigned by the owning grid; null before insertion.
    pub fn id(&self) -> ColumnId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Width in pixels. Zero-width columns stay in the model but cannot be
    /// hit by the pointer.
    pub fn width(&self) -> u32 {
        self.width.unwrap_or(0)
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Position of the column in display (left-to-right) order.
    pub fn display_index(&self) -> usize {
        self.display_index
    }

    /// Editor kind used for this column's cells, if any.
    pub fn editor_kind(&self) -> Option<&EditorKind> {
        self.editor.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_cycle() {
        assert_eq!(SortOrder::None.toggled(), SortOrder::Ascending);
        assert_eq!(SortOrder::Ascending.toggled(), SortOrder::Descending);
        assert_eq!(SortOrder::Descending.toggled(), SortOrder::Ascending);
    }

    #[test]
    fn test_builder() {
        let column = Column::new("Qty")
            .with_text("Quantity")
            .with_width(60)
            .with_editor(EditorKind::Text);
        assert_eq!(column.name(), "Qty");
        assert_eq!(column.text(), "Quantity");
        assert_eq!(column.width(), 60);
        assert_eq!(column.editor_kind(), Some(&EditorKind::Text));
        assert!(Column::unnamed().name().is_empty());
    }
}
