//! Grid rows.

use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::new_key_type;

use super::subitem::SubItem;

new_key_type! {
    /// Stable handle of an item inside its grid.
    pub struct ItemId;
}

/// Identifier of a grid, used as the owner back-reference of its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridId(u64);

impl GridId {
    pub(crate) fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// A row of the grid: an ordered list of sub-items, one per column.
///
/// The first sub-item holds the item's own text. An item built with fewer
/// sub-items than the grid has columns is padded with empty ones on
/// insertion; extra sub-items are dropped.
///
/// ```
/// use gridkit::model::Item;
///
/// let item = Item::new("Apple").with_sub_item("Fruit");
/// assert_eq!(item.text(), "Apple");
/// assert_eq!(item.sub_items().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Item {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    pub(crate) sub_items: Vec<SubItem>,
    pub(crate) selected: bool,
    pub(crate) owner: Option<GridId>,
}

impl Item {
    /// Create an unnamed item whose first cell shows `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            sub_items: vec![SubItem::new(text)],
            ..Self::default()
        }
    }

    /// Create an unnamed item with one cell per text.
    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sub_items: texts.into_iter().map(SubItem::new).collect(),
            ..Self::default()
        }
    }

    /// Create an item with no cells that receives a generated name on
    /// insertion.
    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Give the item an explicit name, unique within its grid.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append a cell.
    pub fn with_sub_item(mut self, sub_item: impl Into<SubItem>) -> Self {
        self.sub_items.push(sub_item.into());
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Handle assigned by the owning grid; null before insertion.
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text of the first cell, or `""` when the item has no cells.
    pub fn text(&self) -> &str {
        self.sub_items.first().map(SubItem::text).unwrap_or("")
    }

    pub fn sub_items(&self) -> &[SubItem] {
        &self.sub_items
    }

    pub fn sub_item(&self, column: usize) -> Option<&SubItem> {
        self.sub_items.get(column)
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// The grid this item belongs to, `None` before insertion.
    pub fn owner(&self) -> Option<GridId> {
        self.owner
    }

    pub(crate) fn sub_item_names(&self) -> impl Iterator<Item = &str> {
        self.sub_items.iter().map(SubItem::name)
    }
}

impl From<&str> for SubItem {
    fn from(text: &str) -> Self {
        SubItem::new(text)
    }
}

impl From<String> for SubItem {
    fn from(text: String) -> Self {
        SubItem::new(text)
    }
}
