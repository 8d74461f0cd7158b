//! Column and item storage with cascading sub-items.

use std::cmp::Ordering;
use std::collections::HashSet;

use gridkit_core::logging::targets;
use slotmap::SlotMap;

use crate::editor::EditorKind;
use crate::error::{EntityKind, GridError, Result};

use super::column::{Column, ColumnId, SortOrder};
use super::item::{GridId, Item, ItemId};
use super::naming::{COLUMN_BASE, ITEM_BASE, SUB_ITEM_BASE, unique_name};
use super::subitem::SubItem;

/// The columns and items of one grid.
///
/// Every item holds exactly one sub-item per column, in column order.
/// Inserting or removing a column inserts or removes the matching sub-item
/// in every item. Indices taken and returned here are logical
/// (insertion-order) indices; the left-to-right display order of columns is
/// a separate permutation.
///
/// The model is read through [`GridListView::model`](crate::GridListView::model);
/// all mutation goes through the view so that change notifications and the
/// editor lock are honored.
#[derive(Debug)]
pub struct GridModel {
    id: GridId,
    columns: SlotMap<ColumnId, Column>,
    column_order: Vec<ColumnId>,
    display_order: Vec<ColumnId>,
    items: SlotMap<ItemId, Item>,
    item_order: Vec<ItemId>,
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GridModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self {
            id: GridId::next(),
            columns: SlotMap::with_key(),
            column_order: Vec::new(),
            display_order: Vec::new(),
            items: SlotMap::with_key(),
            item_order: Vec::new(),
        }
    }

    /// The identifier items use to refer back to this grid.
    pub fn id(&self) -> GridId {
        self.id
    }

    // =========================================================================
    // Columns
    // =========================================================================

    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.column_order
            .get(index)
            .and_then(|id| self.columns.get(*id))
    }

    pub fn column_by_id(&self, id: ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    pub fn column_id(&self, index: usize) -> Option<ColumnId> {
        self.column_order.get(index).copied()
    }

    /// Logical index of a column, `None` once it has been removed.
    pub fn column_index(&self, id: ColumnId) -> Option<usize> {
        self.column_order.iter().position(|c| *c == id)
    }

    /// Find a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<(usize, &Column)> {
        self.columns().enumerate().find(|(_, c)| c.name == name)
    }

    /// Columns in logical order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order
            .iter()
            .filter_map(|id| self.columns.get(*id))
    }

    /// `(logical index, column)` pairs in left-to-right display order.
    pub fn columns_in_display_order(&self) -> impl Iterator<Item = (usize, &Column)> {
        self.display_order.iter().filter_map(|id| {
            let index = self.column_index(*id)?;
            Some((index, self.columns.get(*id)?))
        })
    }

    /// Sum of all column widths.
    pub fn total_width(&self) -> u64 {
        self.columns().map(|c| u64::from(c.width())).sum()
    }

    // =========================================================================
    // Items
    // =========================================================================

    pub fn item_count(&self) -> usize {
        self.item_order.len()
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.item_order.get(index).and_then(|id| self.items.get(*id))
    }

    pub fn item_by_id(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn item_id(&self, index: usize) -> Option<ItemId> {
        self.item_order.get(index).copied()
    }

    /// Current row of an item, `None` once it has been removed.
    pub fn item_index(&self, id: ItemId) -> Option<usize> {
        self.item_order.iter().position(|i| *i == id)
    }

    /// Find an item by name.
    pub fn item_by_name(&self, name: &str) -> Option<(usize, &Item)> {
        self.items().enumerate().find(|(_, i)| i.name == name)
    }

    /// Items in row order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.item_order.iter().filter_map(|id| self.items.get(*id))
    }

    pub fn sub_item(&self, item: usize, column: usize) -> Option<&SubItem> {
        self.item(item).and_then(|i| i.sub_item(column))
    }

    /// Rows of the selected items, ascending.
    pub fn selected_items(&self) -> Vec<usize> {
        self.items()
            .enumerate()
            .filter(|(_, item)| item.selected)
            .map(|(index, _)| index)
            .collect()
    }

    /// Whether the grid has nothing to hit: no columns or no items.
    pub fn is_empty(&self) -> bool {
        self.column_order.is_empty() || self.item_order.is_empty()
    }

    /// Whether every item has exactly one sub-item per column.
    pub fn is_consistent(&self) -> bool {
        let columns = self.column_count();
        self.items().all(|item| item.sub_items.len() == columns)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    pub(crate) fn check_column(&self, index: usize) -> Result<ColumnId> {
        self.column_id(index)
            .ok_or(GridError::ColumnIndexOutOfRange {
                index,
                count: self.column_count(),
            })
    }

    pub(crate) fn check_item(&self, index: usize) -> Result<ItemId> {
        self.item_id(index).ok_or(GridError::ItemIndexOutOfRange {
            index,
            count: self.item_count(),
        })
    }

    /// Whether `column` could be inserted at `index`, without inserting it.
    pub(crate) fn check_column_insert(&self, index: usize, column: &Column) -> Result<()> {
        let count = self.column_count();
        if index > count {
            return Err(GridError::ColumnIndexOutOfRange { index, count });
        }
        if !column.name.is_empty() && self.columns.values().any(|c| c.name == column.name) {
            return Err(GridError::duplicate(EntityKind::Column, column.name.clone()));
        }
        Ok(())
    }

    /// Validate a display move. Returns whether it would reorder anything.
    pub(crate) fn check_column_move(&self, from: usize, to: usize) -> Result<bool> {
        let count = self.display_order.len();
        for index in [from, to] {
            if index >= count {
                return Err(GridError::DisplayIndexOutOfRange { index, count });
            }
        }
        Ok(from != to)
    }

    // =========================================================================
    // Column mutation
    // =========================================================================

    /// Insert a column at a logical index and add an empty sub-item for it
    /// to every item.
    pub(crate) fn insert_column(
        &mut self,
        index: usize,
        mut column: Column,
        default_width: u32,
    ) -> Result<ColumnId> {
        self.check_column_insert(index, &column)?;
        if column.name.is_empty() {
            column.name = unique_name(COLUMN_BASE, self.columns.values().map(Column::name));
        }
        if column.text.is_empty() {
            column.text = column.name.clone();
        }
        column.width.get_or_insert(default_width);

        let id = self.columns.insert_with_key(|id| {
            column.id = id;
            column
        });
        self.column_order.insert(index, id);
        self.display_order
            .insert(index.min(self.display_order.len()), id);
        self.reindex_display();

        for item_id in &self.item_order {
            if let Some(item) = self.items.get_mut(*item_id) {
                let at = index.min(item.sub_items.len());
                item.sub_items.insert(at, SubItem::default());
            }
        }
        self.normalize();

        tracing::debug!(target: targets::MODEL, index, "column inserted");
        Ok(id)
    }

    /// Remove a column and the sub-item at its index in every item.
    pub(crate) fn remove_column(&mut self, index: usize) -> Result<Column> {
        let id = self.check_column(index)?;
        self.column_order.remove(index);
        self.display_order.retain(|c| *c != id);
        self.reindex_display();

        for item_id in &self.item_order {
            if let Some(item) = self.items.get_mut(*item_id)
                && index < item.sub_items.len()
            {
                item.sub_items.remove(index);
            }
        }
        self.normalize();

        let column = self.columns.remove(id).ok_or(GridError::ColumnIndexOutOfRange {
            index,
            count: self.column_count(),
        })?;
        tracing::debug!(target: targets::MODEL, index, name = %column.name, "column removed");
        Ok(column)
    }

    /// Returns the previous width when it changed.
    pub(crate) fn set_column_width(&mut self, index: usize, width: u32) -> Result<Option<u32>> {
        let column = self.column_mut(index)?;
        let old = column.width();
        if old == width {
            return Ok(None);
        }
        column.width = Some(width);
        Ok(Some(old))
    }

    pub(crate) fn set_column_text(&mut self, index: usize, text: String) -> Result<bool> {
        let column = self.column_mut(index)?;
        if column.text == text {
            return Ok(false);
        }
        column.text = text;
        Ok(true)
    }

    /// Returns the previous name when it changed.
    pub(crate) fn rename_column(&mut self, index: usize, name: String) -> Result<Option<String>> {
        let id = self.check_column(index)?;
        if self.columns.get(id).is_some_and(|c| c.name == name) {
            return Ok(None);
        }
        let name = if name.is_empty() {
            unique_name(COLUMN_BASE, self.columns.values().map(Column::name))
        } else if self.columns.values().any(|c| c.name == name) {
            return Err(GridError::duplicate(EntityKind::Column, name));
        } else {
            name
        };
        let column = self.column_mut(index)?;
        Ok(Some(std::mem::replace(&mut column.name, name)))
    }

    pub(crate) fn set_column_editor(
        &mut self,
        index: usize,
        kind: Option<EditorKind>,
    ) -> Result<()> {
        self.column_mut(index)?.editor = kind;
        Ok(())
    }

    /// Move the column at display position `from` to display position `to`.
    pub(crate) fn move_column(&mut self, from: usize, to: usize) -> Result<bool> {
        if !self.check_column_move(from, to)? {
            return Ok(false);
        }
        let id = self.display_order.remove(from);
        self.display_order.insert(to, id);
        self.reindex_display();
        Ok(true)
    }

    /// Show `order` on one column and clear every other indicator.
    pub(crate) fn set_sort_indicator(&mut self, index: usize, order: SortOrder) -> Result<bool> {
        let target = self.check_column(index)?;
        let mut changed = false;
        for (id, column) in self.columns.iter_mut() {
            let wanted = if id == target { order } else { SortOrder::None };
            if column.sort_order != wanted {
                column.sort_order = wanted;
                changed = true;
            }
        }
        Ok(changed)
    }

    /// Stable-sort items by the text of one column. Returns whether the row
    /// order changed.
    pub(crate) fn sort_items(&mut self, index: usize, order: SortOrder) -> Result<bool> {
        self.check_column(index)?;
        if order == SortOrder::None {
            return Ok(false);
        }
        let items = &self.items;
        let text = |id: &ItemId| {
            items
                .get(*id)
                .and_then(|item| item.sub_items.get(index))
                .map(SubItem::text)
                .unwrap_or("")
        };
        let before = self.item_order.clone();
        self.item_order.sort_by(|a, b| {
            let ordering = compare_text(text(a), text(b));
            match order {
                SortOrder::Descending => ordering.reverse(),
                _ => ordering,
            }
        });
        Ok(before != self.item_order)
    }

    // =========================================================================
    // Item mutation
    // =========================================================================

    /// Insert an item at a row, padding or truncating its sub-items to the
    /// column count.
    pub(crate) fn insert_item(&mut self, index: usize, mut item: Item) -> Result<ItemId> {
        let count = self.item_count();
        if index > count {
            return Err(GridError::ItemIndexOutOfRange { index, count });
        }
        if item.name.is_empty() {
            item.name = unique_name(ITEM_BASE, self.items.values().map(Item::name));
        } else if self.items.values().any(|i| i.name == item.name) {
            return Err(GridError::duplicate(EntityKind::Item, item.name));
        }
        let mut seen = HashSet::new();
        for sub_item in &item.sub_items {
            if !sub_item.name.is_empty() && !seen.insert(sub_item.name.as_str()) {
                return Err(GridError::duplicate(EntityKind::SubItem, sub_item.name.clone()));
            }
        }

        let columns = self.column_count();
        if item.sub_items.len() > columns {
            tracing::warn!(
                target: targets::MODEL,
                item = %item.name,
                sub_items = item.sub_items.len(),
                columns,
                "dropping sub-items beyond the column count"
            );
        }
        item.owner = Some(self.id);
        let id = self.items.insert_with_key(|id| {
            item.id = id;
            item
        });
        if let Some(item) = self.items.get_mut(id) {
            conform(item, &self.column_order);
        }
        self.item_order.insert(index, id);

        tracing::debug!(target: targets::MODEL, index, "item inserted");
        Ok(id)
    }

    pub(crate) fn remove_item(&mut self, index: usize) -> Result<Item> {
        let id = self.check_item(index)?;
        self.item_order.remove(index);
        let mut item = self.items.remove(id).ok_or(GridError::ItemIndexOutOfRange {
            index,
            count: self.item_count(),
        })?;
        item.owner = None;
        tracing::debug!(target: targets::MODEL, index, name = %item.name, "item removed");
        Ok(item)
    }

    pub(crate) fn set_selected(&mut self, index: usize, selected: bool) -> Result<bool> {
        let id = self.check_item(index)?;
        match self.items.get_mut(id) {
            Some(item) if item.selected != selected => {
                item.selected = selected;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Write a sub-item's text by handle. Returns `None` when the item or
    /// column no longer exists, otherwise whether the text changed.
    pub(crate) fn set_sub_item_text(
        &mut self,
        item: ItemId,
        column: ColumnId,
        text: String,
    ) -> Option<bool> {
        let index = self.column_index(column)?;
        let sub_item = self.items.get_mut(item)?.sub_items.get_mut(index)?;
        if sub_item.text == text {
            return Some(false);
        }
        sub_item.text = text;
        Some(true)
    }

    pub(crate) fn set_sub_item_editor(
        &mut self,
        item: usize,
        column: usize,
        kind: Option<EditorKind>,
    ) -> Result<()> {
        let item_id = self.check_item(item)?;
        self.check_column(column)?;
        if let Some(sub_item) = self
            .items
            .get_mut(item_id)
            .and_then(|i| i.sub_items.get_mut(column))
        {
            sub_item.editor = kind;
        }
        Ok(())
    }

    /// Remove every item and column.
    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.item_order.clear();
        self.columns.clear();
        self.column_order.clear();
        self.display_order.clear();
        tracing::debug!(target: targets::MODEL, "model cleared");
    }

    /// Restore one sub-item per column in every item. Returns the number of
    /// items whose sub-item count had to be corrected.
    pub(crate) fn normalize(&mut self) -> usize {
        let mut corrected = 0;
        for item_id in &self.item_order {
            if let Some(item) = self.items.get_mut(*item_id)
                && conform(item, &self.column_order)
            {
                corrected += 1;
                tracing::warn!(
                    target: targets::MODEL,
                    item = %item.name,
                    "corrected sub-item count"
                );
            }
        }
        corrected
    }

    fn column_mut(&mut self, index: usize) -> Result<&mut Column> {
        let id = self.check_column(index)?;
        self.columns.get_mut(id).ok_or(GridError::ColumnIndexOutOfRange {
            index,
            count: self.column_order.len(),
        })
    }

    fn reindex_display(&mut self) {
        for (position, id) in self.display_order.iter().enumerate() {
            if let Some(column) = self.columns.get_mut(*id) {
                column.display_index = position;
            }
        }
    }
}

/// Pad or truncate an item's sub-items to `columns`, name unnamed ones and
/// refresh their back-references. Returns whether the count was wrong.
fn conform(item: &mut Item, columns: &[ColumnId]) -> bool {
    let wrong = item.sub_items.len() != columns.len();
    item.sub_items.truncate(columns.len());
    item.sub_items
        .resize_with(columns.len(), SubItem::default);

    for position in 0..item.sub_items.len() {
        if item.sub_items[position].name.is_empty() {
            let name = unique_name(SUB_ITEM_BASE, item.sub_item_names());
            item.sub_items[position].name = name;
        }
        let owner = item.id;
        let sub_item = &mut item.sub_items[position];
        sub_item.owner = owner;
        sub_item.column = columns[position];
    }
    wrong
}

/// Case-insensitive comparison with a case-sensitive tie-break.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with(columns: &[&str], items: &[&[&str]]) -> GridModel {
        let mut model = GridModel::new();
        for (i, name) in columns.iter().enumerate() {
            model.insert_column(i, Column::new(*name), 100).unwrap();
        }
        for (i, texts) in items.iter().enumerate() {
            model
                .insert_item(i, Item::with_texts(texts.iter().copied()))
                .unwrap();
        }
        model
    }

    #[test]
    fn test_insert_column_cascades() {
        let mut model = model_with(&["A"], &[&["a1"], &["a2"]]);
        model.insert_column(0, Column::new("B"), 50).unwrap();
        assert!(model.is_consistent());
        assert_eq!(model.sub_item(0, 0).unwrap().text(), "");
        assert_eq!(model.sub_item(0, 1).unwrap().text(), "a1");
        let b = model.column_id(0).unwrap();
        assert_eq!(model.sub_item(1, 0).unwrap().column(), b);
    }

    #[test]
    fn test_remove_column_cascades() {
        let mut model = model_with(&["A", "B"], &[&["a1", "b1"], &["a2", "b2"], &["a3", "b3"]]);
        let removed = model.remove_column(0).unwrap();
        assert_eq!(removed.name(), "A");
        assert!(model.is_consistent());
        for row in 0..3 {
            let item = model.item(row).unwrap();
            assert_eq!(item.sub_items().len(), 1);
            assert_eq!(item.sub_item(0).unwrap().text(), format!("b{}", row + 1));
        }
    }

    #[test]
    fn test_item_padding_and_truncation() {
        let mut model = model_with(&["A", "B", "C"], &[]);
        model.insert_item(0, Item::new("only")).unwrap();
        assert_eq!(model.item(0).unwrap().sub_items().len(), 3);

        let mut narrow = model_with(&["A"], &[]);
        narrow
            .insert_item(0, Item::with_texts(["x", "y", "z"]))
            .unwrap();
        assert_eq!(narrow.item(0).unwrap().sub_items().len(), 1);
        assert!(narrow.is_consistent());
    }

    #[test]
    fn test_generated_names() {
        let mut model = model_with(&[], &[]);
        model.insert_column(0, Column::unnamed(), 100).unwrap();
        model.insert_item(0, Item::unnamed()).unwrap();
        model.insert_item(1, Item::unnamed()).unwrap();
        assert_eq!(model.column(0).unwrap().name(), "Column1");
        assert_eq!(model.column(0).unwrap().text(), "Column1");
        assert_eq!(model.item(0).unwrap().name(), "Item1");
        assert_eq!(model.item(1).unwrap().name(), "Item2");
        assert_eq!(model.sub_item(1, 0).unwrap().name(), "SubItem1");
    }

    #[test]
    fn test_duplicate_explicit_names_are_rejected() {
        let mut model = model_with(&["A"], &[]);
        assert_eq!(
            model.insert_column(1, Column::new("A"), 100),
            Err(GridError::duplicate(EntityKind::Column, "A"))
        );
        model.insert_item(0, Item::new("x").with_name("Row")).unwrap();
        assert!(matches!(
            model.insert_item(1, Item::new("y").with_name("Row")),
            Err(GridError::DuplicateName {
                kind: EntityKind::Item,
                ..
            })
        ));
        let item = Item::unnamed()
            .with_sub_item(SubItem::new("1").with_name("S"))
            .with_sub_item(SubItem::new("2").with_name("S"));
        assert!(matches!(
            model.insert_item(1, item),
            Err(GridError::DuplicateName {
                kind: EntityKind::SubItem,
                ..
            })
        ));
        assert_eq!(model.item_count(), 1);
    }

    #[test]
    fn test_out_of_range() {
        let mut model = model_with(&["A"], &[&["a"]]);
        assert_eq!(
            model.insert_column(5, Column::unnamed(), 100),
            Err(GridError::ColumnIndexOutOfRange { index: 5, count: 1 })
        );
        assert_eq!(
            model.remove_item(1).unwrap_err(),
            GridError::ItemIndexOutOfRange { index: 1, count: 1 }
        );
    }

    #[test]
    fn test_move_column_updates_display_order() {
        let mut model = model_with(&["A", "B", "C"], &[]);
        assert!(model.move_column(0, 2).unwrap());
        let order: Vec<_> = model
            .columns_in_display_order()
            .map(|(i, c)| (i, c.name().to_string()))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, String::from("B")),
                (2, String::from("C")),
                (0, String::from("A"))
            ]
        );
        assert_eq!(model.column(0).unwrap().display_index(), 2);
        assert!(matches!(
            model.move_column(3, 0),
            Err(GridError::DisplayIndexOutOfRange { index: 3, count: 3 })
        ));
    }

    #[test]
    fn test_sort_items_is_stable() {
        let mut model = model_with(
            &["Name", "Kind"],
            &[&["pear", "b"], &["apple", "a"], &["fig", "b"], &["Banana", "a"]],
        );
        assert!(model.sort_items(1, SortOrder::Ascending).unwrap());
        let names: Vec<_> = model.items().map(|i| i.text().to_string()).collect();
        assert_eq!(names, ["apple", "Banana", "pear", "fig"]);

        model.sort_items(0, SortOrder::Descending).unwrap();
        let names: Vec<_> = model.items().map(|i| i.text().to_string()).collect();
        assert_eq!(names, ["pear", "fig", "Banana", "apple"]);
    }

    #[test]
    fn test_sort_indicator_is_exclusive() {
        let mut model = model_with(&["A", "B"], &[]);
        model.set_sort_indicator(0, SortOrder::Ascending).unwrap();
        model.set_sort_indicator(1, SortOrder::Descending).unwrap();
        assert_eq!(model.column(0).unwrap().sort_order(), SortOrder::None);
        assert_eq!(model.column(1).unwrap().sort_order(), SortOrder::Descending);
    }

    #[test]
    fn test_set_sub_item_text_by_handle() {
        let mut model = model_with(&["A", "B"], &[&["a", "b"]]);
        let item = model.item_id(0).unwrap();
        let column = model.column_id(1).unwrap();
        assert_eq!(model.set_sub_item_text(item, column, "new".into()), Some(true));
        assert_eq!(model.set_sub_item_text(item, column, "new".into()), Some(false));
        model.remove_column(1).unwrap();
        assert_eq!(model.set_sub_item_text(item, column, "x".into()), None);
    }

    #[test]
    fn test_normalize_repairs_items() {
        let mut model = model_with(&["A", "B"], &[&["a", "b"]]);
        let id = model.item_id(0).unwrap();
        model.items[id].sub_items.pop();
        assert!(!model.is_consistent());
        assert_eq!(model.normalize(), 1);
        assert!(model.is_consistent());
        assert_eq!(model.normalize(), 0);
    }

    #[test]
    fn test_removed_item_is_detached() {
        let mut model = model_with(&["A"], &[&["a"]]);
        assert_eq!(model.item(0).unwrap().owner(), Some(model.id()));
        let item = model.remove_item(0).unwrap();
        assert_eq!(item.owner(), None);
        assert!(model.is_empty());
    }
}
