//! The grid list view.
//!
//! [`GridListView`] owns a [`GridModel`] and everything needed to present
//! and edit it: layout state (viewport, scroll offsets), hover and
//! selection, the embedded [`EditorHost`], the editor registry and the
//! themed [`GridAppearance`].
//!
//! # Example
//!
//! ```
//! use gridkit::prelude::*;
//!
//! let mut grid = GridListView::new();
//! grid.add_column(Column::new("Name").with_editor(EditorKind::Text)).unwrap();
//! grid.add_column(Column::new("Category").with_editor(EditorKind::Text)).unwrap();
//! grid.add_item(Item::new("Apple").with_sub_item("Fruit")).unwrap();
//!
//! grid.signals().changed.connect(|change| println!("{change:?}"));
//!
//! let center = grid.cell_rect(0, 1).unwrap().center();
//! assert_eq!(grid.region_at(center), Region::Item { item: 0, column: 1 });
//!
//! assert!(grid.begin_edit(0, 1));
//! grid.active_editor_mut().unwrap().set_text("Produce");
//! grid.commit_edit();
//! assert_eq!(grid.model().sub_item(0, 1).unwrap().text(), "Produce");
//! ```

use std::sync::Arc;

use gridkit_core::DeferredQueue;
use gridkit_core::logging::targets;
use gridkit_style::Theme;

use crate::config::{GridConfig, SelectionMode};
use crate::editor::{
    EditOutcome, EditorHost, EditorInput, EditorKind, EditorRegistry, EditorResponse,
    EditorWidget, EmbeddedEditor, HostState, UnloadReason,
};
use crate::error::{GridError, Result};
use crate::geometry::{Point, Rect, Size};
use crate::model::{Column, ColumnId, GridModel, Item, ItemId, SortOrder};
use crate::notify::{
    ClickEvent, EditFinished, EditStarted, GridChange, GridCommand, GridSignals, HoverEvent,
    HoverKind,
};
use crate::region::{GridLayout, Region, ScrollDirection, classify};
use crate::theme::{CellColors, GridAppearance, ThemeReport};

/// Rounds of deferred commands applied before the queue is considered to be
/// feeding itself.
const MAX_DEFERRED_ROUNDS: usize = 64;

/// A tabular list of items with column headers, hit-testing and embedded
/// cell editors.
///
/// All mutation goes through `&mut self`. Signals fire synchronously after
/// each change; handlers that need to change the grid post a
/// [`GridCommand`] to [`deferred`](Self::deferred).
///
/// # Signals
///
/// See [`GridSignals`]: `changed`, `hover`, `clicked`, `edit_started`,
/// `edit_finished`, `redraw_requested` and `theme_changed`.
pub struct GridListView {
    model: GridModel,
    config: GridConfig,

    /// `None` until the host window reports a size.
    viewport: Option<Size>,
    scroll_x: f32,
    scroll_y: f32,
    focused: bool,

    hovered: Region,
    last_pointer: Option<Point>,

    host: EditorHost,
    registry: EditorRegistry,

    theme: Arc<Theme>,
    appearance: GridAppearance,

    signals: GridSignals,
    deferred: DeferredQueue<GridCommand>,
    flushing: bool,
}

impl Default for GridListView {
    fn default() -> Self {
        Self::new()
    }
}

impl GridListView {
    /// Create an empty grid with the default configuration, the light theme
    /// and the built-in editors.
    pub fn new() -> Self {
        let theme = Arc::new(Theme::light());
        Self {
            model: GridModel::new(),
            config: GridConfig::default(),
            viewport: None,
            scroll_x: 0.0,
            scroll_y: 0.0,
            focused: false,
            hovered: Region::Nowhere,
            last_pointer: None,
            host: EditorHost::new(),
            registry: EditorRegistry::with_defaults(),
            appearance: GridAppearance::from_palette(theme.palette()),
            theme,
            signals: GridSignals::new(),
            deferred: DeferredQueue::new(),
            flushing: false,
        }
    }

    /// Set the configuration using builder pattern.
    pub fn with_config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initial theme using builder pattern. No signal is emitted.
    pub fn with_theme(mut self, theme: Arc<Theme>) -> Self {
        self.appearance = GridAppearance::from_palette(theme.palette());
        self.theme = theme;
        self
    }

    /// Replace the editor registry using builder pattern.
    pub fn with_registry(mut self, registry: EditorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the viewport size using builder pattern.
    pub fn with_viewport(mut self, size: Size) -> Self {
        self.viewport = Some(size);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn signals(&self) -> &GridSignals {
        &self.signals
    }

    /// Queue for mutations requested from inside signal handlers.
    ///
    /// Clone it into a slot and post [`GridCommand`]s; they run after the
    /// operation that emitted the signal completes.
    pub fn deferred(&self) -> DeferredQueue<GridCommand> {
        self.deferred.clone()
    }

    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    pub fn appearance(&self) -> &GridAppearance {
        &self.appearance
    }

    pub fn registry(&self) -> &EditorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EditorRegistry {
        &mut self.registry
    }

    pub fn editor_host(&self) -> &EditorHost {
        &self.host
    }

    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    /// Current `(x, y)` scroll offset in pixels.
    pub fn scroll_offset(&self) -> (f32, f32) {
        (self.scroll_x, self.scroll_y)
    }

    /// The region under the pointer, as of the last pointer event.
    pub fn hovered(&self) -> Region {
        self.hovered
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn column_count(&self) -> usize {
        self.model.column_count()
    }

    pub fn item_count(&self) -> usize {
        self.model.item_count()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn set_sorting_enabled(&mut self, enabled: bool) {
        self.config.sorting_enabled = enabled;
    }

    /// Change the selection mode, trimming the selection to fit it.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.config.selection_mode = mode;
        let selected = self.model.selected_items();
        let keep = match mode {
            SelectionMode::None => 0,
            SelectionMode::Single => 1,
            SelectionMode::Multi => selected.len(),
        };
        for item in selected.into_iter().skip(keep) {
            self.set_selected_inner(item, false);
        }
        self.flush_deferred();
    }

    /// Change the row height. An active editor is committed.
    pub fn set_row_height(&mut self, height: f32) {
        if self.config.row_height == height {
            return;
        }
        self.finish_edit(UnloadReason::Resized);
        self.config.row_height = height;
        self.after_layout_change();
        self.flush_deferred();
    }

    /// Show or hide the header band. An active editor is committed.
    pub fn set_header_visible(&mut self, visible: bool) {
        if self.config.header_visible == visible {
            return;
        }
        self.finish_edit(UnloadReason::Resized);
        self.config.header_visible = visible;
        self.after_layout_change();
        self.flush_deferred();
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Append a column.
    pub fn add_column(&mut self, column: Column) -> Result<ColumnId> {
        self.insert_column(self.model.column_count(), column)
    }

    /// Insert a column at a logical index. Every item gains an empty
    /// sub-item at that index.
    pub fn insert_column(&mut self, index: usize, column: Column) -> Result<ColumnId> {
        self.model.check_column_insert(index, &column)?;
        self.finish_edit(UnloadReason::Structural);
        let id = self
            .model
            .insert_column(index, column, self.config.default_column_width)?;
        self.emit(GridChange::ColumnInserted { index });
        self.after_layout_change();
        self.flush_deferred();
        Ok(id)
    }

    /// Append a column with a generated name.
    pub fn add_default_column(&mut self) -> Result<ColumnId> {
        self.add_column(Column::unnamed())
    }

    /// Insert a column with a generated name.
    pub fn insert_default_column(&mut self, index: usize) -> Result<ColumnId> {
        self.insert_column(index, Column::unnamed())
    }

    /// Remove a column and its sub-item from every item.
    ///
    /// An editor bound to the column is unloaded first and its value
    /// discarded.
    pub fn remove_column(&mut self, index: usize) -> Result<Column> {
        let id = self.model.check_column(index)?;
        let reason = if self.host.binding().is_some_and(|(_, column)| column == id) {
            UnloadReason::ColumnRemoved
        } else {
            UnloadReason::Structural
        };
        self.finish_edit(reason);
        let column = self.model.remove_column(index)?;
        self.emit(GridChange::ColumnRemoved {
            index,
            name: column.name().to_string(),
        });
        self.after_layout_change();
        self.flush_deferred();
        Ok(column)
    }

    pub fn set_column_width(&mut self, index: usize, width: u32) -> Result<()> {
        self.model.check_column(index)?;
        if self.model.column(index).is_some_and(|c| c.width() != width) {
            self.finish_edit(UnloadReason::Structural);
        }
        if let Some(old_width) = self.model.set_column_width(index, width)? {
            self.emit(GridChange::ColumnResized {
                index,
                old_width,
                new_width: width,
            });
            self.after_layout_change();
        }
        self.flush_deferred();
        Ok(())
    }

    /// Set a column's header text.
    pub fn set_column_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        if self.model.set_column_text(index, text.into())? {
            self.emit(GridChange::ColumnTextChanged { index });
            self.request_redraw();
        }
        self.flush_deferred();
        Ok(())
    }

    /// Rename a column. An empty name is replaced by a generated one; a name
    /// used by another column is rejected.
    pub fn rename_column(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        if let Some(old_name) = self.model.rename_column(index, name.into())? {
            let new_name = self
                .model
                .column(index)
                .map(|c| c.name().to_string())
                .unwrap_or_default();
            self.emit(GridChange::ColumnRenamed {
                index,
                old_name,
                new_name,
            });
            self.request_redraw();
        }
        self.flush_deferred();
        Ok(())
    }

    /// Set or clear the editor kind of a column.
    pub fn set_column_editor(&mut self, index: usize, kind: Option<EditorKind>) -> Result<()> {
        self.model.set_column_editor(index, kind)
    }

    /// Move the column at display position `from` to display position `to`.
    pub fn move_column(&mut self, from: usize, to: usize) -> Result<()> {
        if self.model.check_column_move(from, to)? {
            self.finish_edit(UnloadReason::Structural);
        }
        let column = self
            .model
            .columns_in_display_order()
            .nth(from)
            .map(|(index, _)| index);
        if self.model.move_column(from, to)? {
            if let Some(column) = column {
                self.emit(GridChange::ColumnMoved { column, from, to });
            }
            self.after_layout_change();
        }
        self.flush_deferred();
        Ok(())
    }

    /// Show a sort indicator on a column without reordering items.
    pub fn set_sort_indicator(&mut self, index: usize, order: SortOrder) -> Result<()> {
        if self.model.set_sort_indicator(index, order)? {
            self.emit(GridChange::SortChanged {
                column: index,
                order,
            });
            self.request_redraw();
        }
        self.flush_deferred();
        Ok(())
    }

    /// Show the sort indicator on a column and stably sort items by its
    /// text.
    pub fn sort_by_column(&mut self, index: usize, order: SortOrder) -> Result<()> {
        let indicator_changed = self.model.set_sort_indicator(index, order)?;
        let reordered = self.model.sort_items(index, order)?;
        if indicator_changed {
            self.emit(GridChange::SortChanged {
                column: index,
                order,
            });
        }
        if reordered {
            self.emit(GridChange::ItemsSorted {
                column: index,
                order,
            });
            self.reposition_editor();
            self.refresh_hover();
        }
        self.request_redraw();
        self.flush_deferred();
        Ok(())
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Append an item.
    pub fn add_item(&mut self, item: Item) -> Result<ItemId> {
        self.insert_item(self.model.item_count(), item)
    }

    /// Insert an item at a row. Its sub-items are padded or truncated to the
    /// column count.
    pub fn insert_item(&mut self, index: usize, item: Item) -> Result<ItemId> {
        let id = self.model.insert_item(index, item)?;
        self.emit(GridChange::ItemInserted { index });
        self.after_layout_change();
        self.flush_deferred();
        Ok(id)
    }

    /// Append an item with a generated name and empty cells.
    pub fn add_default_item(&mut self) -> Result<ItemId> {
        self.add_item(Item::unnamed())
    }

    /// Insert an item with a generated name and empty cells.
    pub fn insert_default_item(&mut self, index: usize) -> Result<ItemId> {
        self.insert_item(index, Item::unnamed())
    }

    /// Remove an item. An editor bound to one of its cells is unloaded first
    /// and its value discarded.
    pub fn remove_item(&mut self, index: usize) -> Result<Item> {
        let id = self.model.check_item(index)?;
        if self.host.binding().is_some_and(|(item, _)| item == id) {
            self.finish_edit(UnloadReason::ItemRemoved);
        }
        let item = self.model.remove_item(index)?;
        self.emit(GridChange::ItemRemoved {
            index,
            name: item.name().to_string(),
        });
        self.after_layout_change();
        self.flush_deferred();
        Ok(item)
    }

    /// Set the text of a cell.
    ///
    /// Fails with [`GridError::SubItemLocked`] while an editor is active on
    /// the cell.
    pub fn set_sub_item_text(
        &mut self,
        item: usize,
        column: usize,
        text: impl Into<String>,
    ) -> Result<()> {
        let item_id = self.model.check_item(item)?;
        let column_id = self.model.check_column(column)?;
        if self.host.is_bound_to(item_id, column_id) {
            return Err(GridError::SubItemLocked { item, column });
        }
        if self.model.set_sub_item_text(item_id, column_id, text.into()) == Some(true) {
            self.emit(GridChange::SubItemTextChanged { item, column });
            self.request_redraw();
        }
        self.flush_deferred();
        Ok(())
    }

    /// Set or clear a per-cell editor kind, overriding the column's.
    pub fn set_sub_item_editor(
        &mut self,
        item: usize,
        column: usize,
        kind: Option<EditorKind>,
    ) -> Result<()> {
        self.model.set_sub_item_editor(item, column, kind)
    }

    /// Remove every item and column. An active editor is unloaded and its
    /// value discarded.
    pub fn clear(&mut self) {
        self.finish_edit(UnloadReason::ItemRemoved);
        self.model.clear();
        self.scroll_x = 0.0;
        self.scroll_y = 0.0;
        self.emit(GridChange::Cleared);
        self.after_layout_change();
        self.flush_deferred();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Rows of the selected items, ascending.
    pub fn selected_items(&self) -> Vec<usize> {
        self.model.selected_items()
    }

    /// Select or deselect an item. In [`SelectionMode::Single`], selecting an
    /// item deselects every other one.
    pub fn select_item(&mut self, index: usize, selected: bool) -> Result<()> {
        self.model.check_item(index)?;
        if selected && self.config.selection_mode == SelectionMode::Single {
            self.select_exclusive(index);
        } else {
            self.set_selected_inner(index, selected);
        }
        self.flush_deferred();
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        for item in self.model.selected_items() {
            self.set_selected_inner(item, false);
        }
        self.flush_deferred();
    }

    fn select_exclusive(&mut self, index: usize) {
        for item in self.model.selected_items() {
            if item != index {
                self.set_selected_inner(item, false);
            }
        }
        self.set_selected_inner(index, true);
    }

    fn set_selected_inner(&mut self, index: usize, selected: bool) {
        if let Ok(true) = self.model.set_selected(index, selected) {
            self.emit(GridChange::SelectionChanged {
                item: index,
                selected,
            });
            self.request_redraw();
        }
    }

    // =========================================================================
    // Layout and scrolling
    // =========================================================================

    /// Geometry snapshot for hit-testing and painting.
    pub fn layout(&self) -> GridLayout {
        GridLayout::compute(
            &self.model,
            &self.config,
            self.viewport,
            self.scroll_x,
            self.scroll_y,
        )
    }

    /// Classify a point in viewport coordinates.
    pub fn region_at(&self, point: Point) -> Region {
        classify(&self.layout(), point)
    }

    /// Viewport rectangle of a cell.
    pub fn cell_rect(&self, item: usize, column: usize) -> Option<Rect> {
        self.layout().cell_rect(item, column)
    }

    /// Viewport rectangle of a column header.
    pub fn header_rect(&self, column: usize) -> Option<Rect> {
        self.layout().header_rect(column)
    }

    /// Resize the viewport. An active editor is committed.
    pub fn set_viewport(&mut self, size: Option<Size>) {
        if self.viewport == size {
            return;
        }
        self.finish_edit(UnloadReason::Resized);
        self.viewport = size;
        self.after_layout_change();
        self.flush_deferred();
    }

    /// Scroll to an offset, clamped to the content. Returns whether the
    /// offset changed. An active editor is committed when it does.
    pub fn set_scroll_offset(&mut self, x: f32, y: f32) -> bool {
        let changed = self.scroll_to_inner(x, y);
        if changed {
            self.reposition_editor();
            self.refresh_hover();
            self.request_redraw();
        }
        self.flush_deferred();
        changed
    }

    pub fn scroll_by(&mut self, dx: f32, dy: f32) -> bool {
        self.set_scroll_offset(self.scroll_x + dx, self.scroll_y + dy)
    }

    /// Scroll one step: a row vertically, the configured step horizontally.
    pub fn scroll(&mut self, direction: ScrollDirection) -> bool {
        let row = self.config.row_height;
        let step = self.config.horizontal_scroll_step;
        match direction {
            ScrollDirection::Up => self.scroll_by(0.0, -row),
            ScrollDirection::Down => self.scroll_by(0.0, row),
            ScrollDirection::Left => self.scroll_by(-step, 0.0),
            ScrollDirection::Right => self.scroll_by(step, 0.0),
        }
    }

    /// Scroll vertically until an item's row is fully visible.
    pub fn ensure_visible(&mut self, item: usize) -> Result<()> {
        self.model.check_item(item)?;
        let Some(viewport) = self.viewport else {
            return Ok(());
        };
        let layout = self.layout();
        let thickness = self.config.scrollbar_thickness;
        let (horizontal, _) = layout.overflow(thickness);
        let visible = viewport.height
            - layout.header_height
            - if horizontal { thickness } else { 0.0 };

        let top = item as f32 * self.config.row_height;
        let bottom = top + self.config.row_height;
        let y = if top < self.scroll_y {
            top
        } else if bottom > self.scroll_y + visible {
            bottom - visible
        } else {
            self.scroll_y
        };
        self.set_scroll_offset(self.scroll_x, y);
        Ok(())
    }

    fn scroll_to_inner(&mut self, x: f32, y: f32) -> bool {
        let (max_x, max_y) = self.layout().max_scroll(self.config.scrollbar_thickness);
        let x = x.clamp(0.0, max_x);
        let y = y.clamp(0.0, max_y);
        if x == self.scroll_x && y == self.scroll_y {
            return false;
        }
        self.finish_edit(UnloadReason::Scrolled);
        self.scroll_x = x;
        self.scroll_y = y;
        true
    }

    // =========================================================================
    // Pointer and focus
    // =========================================================================

    /// Track the pointer, emitting hover transitions.
    pub fn pointer_moved(&mut self, position: Point) -> Region {
        self.last_pointer = Some(position);
        let region = self.region_at(position);
        self.update_hover(region, Some(position), true);
        self.flush_deferred();
        region
    }

    /// The pointer left the grid.
    pub fn pointer_left(&mut self) {
        self.last_pointer = None;
        self.update_hover(Region::Nowhere, None, false);
        self.flush_deferred();
    }

    /// Handle a click.
    ///
    /// A click outside the active editor commits it. Item clicks update the
    /// selection, header clicks sort when sorting is enabled and scroll
    /// affordance clicks scroll one step.
    pub fn click(&mut self, position: Point) -> Region {
        let region = self.region_at(position);
        if let Some(editor) = self.host.editor() {
            if editor.geometry().contains(position) {
                return region;
            }
            self.finish_edit(UnloadReason::FocusLost);
        }

        tracing::trace!(target: targets::VIEW, ?region, "click");
        self.signals.clicked.emit(ClickEvent::new(region, position));

        match region {
            Region::Item { item, .. } => self.click_select(item),
            Region::Header { column } if self.config.sorting_enabled => {
                let order = self
                    .model
                    .column(column)
                    .map_or(SortOrder::Ascending, |c| c.sort_order().toggled());
                if let Err(err) = self.sort_by_column(column, order) {
                    tracing::warn!(target: targets::VIEW, error = %err, "header sort failed");
                }
            }
            Region::Scroll(direction) => {
                self.scroll(direction);
            }
            _ => {}
        }
        self.flush_deferred();
        region
    }

    fn click_select(&mut self, item: usize) {
        match self.config.selection_mode {
            SelectionMode::None => {}
            SelectionMode::Single => self.select_exclusive(item),
            SelectionMode::Multi => {
                let selected = self.model.item(item).is_some_and(Item::is_selected);
                self.set_selected_inner(item, !selected);
            }
        }
    }

    /// Gain or lose keyboard focus. Losing focus commits an active editor.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.finish_edit(UnloadReason::FocusLost);
        }
        self.flush_deferred();
    }

    fn update_hover(&mut self, current: Region, position: Option<Point>, moved: bool) {
        let previous = self.hovered;
        if previous == current {
            if moved && !current.is_nowhere() {
                self.signals.hover.emit(HoverEvent {
                    kind: HoverKind::Move,
                    previous,
                    current,
                    position,
                });
            }
            return;
        }

        self.hovered = current;
        tracing::trace!(target: targets::VIEW, ?previous, ?current, "hover changed");
        if !previous.is_nowhere() {
            self.signals.hover.emit(HoverEvent {
                kind: HoverKind::Leave,
                previous,
                current,
                position,
            });
        }
        if !current.is_nowhere() {
            self.signals.hover.emit(HoverEvent {
                kind: HoverKind::Enter,
                previous,
                current,
                position,
            });
        }
        self.request_redraw();
    }

    /// Re-classify the last pointer position after the layout changed.
    fn refresh_hover(&mut self) {
        let region = match self.last_pointer {
            Some(position) => self.region_at(position),
            None => Region::Nowhere,
        };
        self.update_hover(region, self.last_pointer, false);
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Start editing a cell with the editor its kind resolves to.
    ///
    /// The sub-item's editor kind wins over the column's. Returns `false`
    /// when the cell does not exist or has no editor kind, when no factory is
    /// registered for the kind, or when the editor declines to load.
    pub fn begin_edit(&mut self, item: usize, column: usize) -> bool {
        let kind = self
            .model
            .sub_item(item, column)
            .and_then(|s| s.editor_kind())
            .or_else(|| self.model.column(column).and_then(Column::editor_kind))
            .cloned();
        let Some(kind) = kind else {
            tracing::debug!(target: targets::EDITOR, item, column, "cell is not editable");
            return false;
        };
        let Some(editor) = self.registry.create(&kind) else {
            tracing::warn!(target: targets::EDITOR, ?kind, "no editor registered for kind");
            return false;
        };
        self.begin_edit_with(item, column, editor)
    }

    /// Start editing a cell with a caller-supplied editor.
    ///
    /// An editor active on another cell is committed first. Asking to edit
    /// the cell already being edited keeps the current session.
    pub fn begin_edit_with(
        &mut self,
        item: usize,
        column: usize,
        editor: Box<dyn EmbeddedEditor>,
    ) -> bool {
        let (Some(item_id), Some(column_id)) =
            (self.model.item_id(item), self.model.column_id(column))
        else {
            tracing::debug!(target: targets::EDITOR, item, column, "no such cell, not editing");
            return false;
        };
        if self.host.is_bound_to(item_id, column_id) {
            return true;
        }
        self.finish_edit(UnloadReason::Replaced);
        if let Err(err) = self.ensure_visible(item) {
            tracing::debug!(target: targets::EDITOR, error = %err, "cell vanished before editing");
        }

        // Handlers run by the steps above may have moved or removed the cell.
        let (Some(item), Some(column)) = (
            self.model.item_index(item_id),
            self.model.column_index(column_id),
        ) else {
            self.flush_deferred();
            return false;
        };
        let rect = self.cell_rect(item, column).unwrap_or(Rect::ZERO);
        let colors = self.appearance.editor_colors();
        let loaded = self
            .host
            .load(editor, &self.model, item_id, column_id, rect, &colors);
        if loaded {
            self.signals.edit_started.emit(EditStarted { item, column });
            self.request_redraw();
        }
        self.flush_deferred();
        loaded
    }

    /// Start editing the cell under a point.
    pub fn begin_edit_at(&mut self, point: Point) -> bool {
        match self.region_at(point) {
            Region::Item { item, column } => self.begin_edit(item, column),
            _ => false,
        }
    }

    /// Commit the active editor.
    pub fn commit_edit(&mut self) -> Option<EditOutcome> {
        let outcome = self.finish_edit(UnloadReason::Commit);
        self.flush_deferred();
        outcome
    }

    /// Cancel the active editor, discarding its value.
    pub fn cancel_edit(&mut self) -> Option<EditOutcome> {
        let outcome = self.finish_edit(UnloadReason::Cancel);
        self.flush_deferred();
        outcome
    }

    /// Route keyboard input to the active editor and act on its response.
    pub fn send_editor_input(&mut self, input: EditorInput) -> EditorResponse {
        let Some(editor) = self.host.editor_mut() else {
            return EditorResponse::Ignored;
        };
        let response = editor.handle_input(input);
        match response {
            EditorResponse::Commit => {
                self.finish_edit(UnloadReason::Commit);
            }
            EditorResponse::Cancel => {
                self.finish_edit(UnloadReason::Cancel);
            }
            EditorResponse::Handled => self.request_redraw(),
            EditorResponse::Ignored => {}
        }
        self.flush_deferred();
        response
    }

    pub fn editor_state(&self) -> HostState {
        self.host.state()
    }

    pub fn active_editor(&self) -> Option<&dyn EmbeddedEditor> {
        self.host.editor()
    }

    pub fn active_editor_mut(&mut self) -> Option<&mut dyn EmbeddedEditor> {
        self.host.editor_mut()
    }

    /// `(item, column)` of the cell being edited.
    pub fn editing_cell(&self) -> Option<(usize, usize)> {
        let (item, column) = self.host.binding()?;
        Some((self.model.item_index(item)?, self.model.column_index(column)?))
    }

    /// The text a cell currently shows: the editor's in-flight value while
    /// the cell is being edited, the stored text otherwise.
    pub fn live_text(&self, item: usize, column: usize) -> Option<&str> {
        if self.editing_cell() == Some((item, column)) {
            return self.host.editor().map(|editor| editor.text());
        }
        self.model.sub_item(item, column).map(|s| s.text())
    }

    fn finish_edit(&mut self, reason: UnloadReason) -> Option<EditOutcome> {
        let finished = self.host.unload(reason, &mut self.model)?;
        let item = self.model.item_index(finished.item);
        let column = self.model.column_index(finished.column);

        if let (EditOutcome::Committed { changed: true }, Some(item), Some(column)) =
            (finished.outcome, item, column)
        {
            self.emit(GridChange::SubItemTextChanged { item, column });
        }
        self.signals.edit_finished.emit(EditFinished {
            item,
            column,
            reason,
            outcome: finished.outcome,
        });
        self.request_redraw();
        Some(finished.outcome)
    }

    fn reposition_editor(&mut self) {
        let rect = self
            .editing_cell()
            .and_then(|(item, column)| self.cell_rect(item, column));
        if let Some(rect) = rect {
            self.host.set_geometry(rect);
        }
    }

    // =========================================================================
    // Theme
    // =========================================================================

    /// Apply a theme to every themed color and to the active editor.
    ///
    /// Emits `theme_changed` only when a color changed, and always requests
    /// a redraw. Model data is never touched.
    #[tracing::instrument(skip_all, target = "gridkit::view", fields(theme = %theme.name()))]
    pub fn apply_theme(&mut self, theme: Arc<Theme>) -> ThemeReport {
        let report = self.appearance.apply(theme.palette());
        self.theme = theme;
        self.host.apply_colors(&self.appearance.editor_colors());
        if !report.is_unchanged() {
            self.signals.theme_changed.emit(report.clone());
        }
        self.request_redraw();
        self.flush_deferred();
        report
    }

    /// Colors for painting a cell in its current hover and selection state.
    pub fn cell_colors(&self, item: usize, column: usize) -> Option<CellColors> {
        self.model.sub_item(item, column)?;
        let selected = self.model.item(item).is_some_and(Item::is_selected);
        let hovered = self.hovered.item() == Some(item);
        Some(self.appearance.cell_colors(selected, hovered))
    }

    /// Colors for painting a column header in its current hover state.
    pub fn header_colors(&self, column: usize) -> Option<CellColors> {
        self.model.column(column)?;
        let hovered = self.hovered == Region::Header { column };
        Some(self.appearance.header_colors(hovered))
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn emit(&self, change: GridChange) {
        self.signals.changed.emit(change);
    }

    fn request_redraw(&self) {
        self.signals.redraw_requested.emit(());
    }

    fn after_layout_change(&mut self) {
        self.scroll_to_inner(self.scroll_x, self.scroll_y);
        self.reposition_editor();
        self.refresh_hover();
        self.request_redraw();
    }

    /// Apply commands posted by handlers, including commands posted by the
    /// handlers those commands trigger.
    fn flush_deferred(&mut self) {
        if self.flushing {
            return;
        }
        self.flushing = true;
        for _ in 0..MAX_DEFERRED_ROUNDS {
            let commands = self.deferred.drain();
            if commands.is_empty() {
                self.flushing = false;
                return;
            }
            for command in commands {
                self.apply_command(command);
            }
        }
        let dropped = self.deferred.drain().len();
        tracing::warn!(
            target: targets::VIEW,
            dropped,
            "deferred commands keep re-queueing, dropping"
        );
        self.flushing = false;
    }

    fn apply_command(&mut self, command: GridCommand) {
        tracing::debug!(target: targets::VIEW, ?command, "applying deferred command");
        let result = match command {
            GridCommand::AddColumn(column) => self.add_column(column).map(drop),
            GridCommand::InsertColumn(index, column) => {
                self.insert_column(index, column).map(drop)
            }
            GridCommand::RemoveColumn(index) => self.remove_column(index).map(drop),
            GridCommand::SetColumnWidth(index, width) => self.set_column_width(index, width),
            GridCommand::AddItem(item) => self.add_item(item).map(drop),
            GridCommand::InsertItem(index, item) => self.insert_item(index, item).map(drop),
            GridCommand::RemoveItem(index) => self.remove_item(index).map(drop),
            GridCommand::SetText { item, column, text } => {
                self.set_sub_item_text(item, column, text)
            }
            GridCommand::Select { item, selected } => self.select_item(item, selected),
            GridCommand::BeginEdit { item, column } => {
                self.begin_edit(item, column);
                Ok(())
            }
            GridCommand::CommitEdit => {
                self.commit_edit();
                Ok(())
            }
            GridCommand::CancelEdit => {
                self.cancel_edit();
                Ok(())
            }
            GridCommand::Clear => {
                self.clear();
                Ok(())
            }
        };
        if let Err(err) = result {
            tracing::warn!(target: targets::VIEW, error = %err, "deferred command failed");
        }
    }
}

impl std::fmt::Debug for GridListView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridListView")
            .field("columns", &self.model.column_count())
            .field("items", &self.model.item_count())
            .field("viewport", &self.viewport)
            .field("scroll", &(self.scroll_x, self.scroll_y))
            .field("hovered", &self.hovered)
            .field("editor", &self.host)
            .field("theme", &self.theme.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gridkit_style::{ColorPalette, PaletteRole, ThemeMode};
    use parking_lot::Mutex;

    use super::*;
    use crate::editor::TextEditor;

    fn recorder<T: Clone + Send + 'static>(
        signal: &gridkit_core::Signal<T>,
    ) -> Arc<Mutex<Vec<T>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        signal.connect(move |event: &T| sink.lock().push(event.clone()));
        events
    }

    fn produce_grid() -> GridListView {
        let mut grid = GridListView::new();
        grid.add_column(Column::new("Name").with_editor(EditorKind::Text))
            .unwrap();
        grid.add_column(Column::new("Category").with_editor(EditorKind::Text))
            .unwrap();
        grid.add_item(Item::new("Apple").with_sub_item("Fruit")).unwrap();
        grid.add_item(Item::new("Carrot").with_sub_item("Vegetable"))
            .unwrap();
        grid.add_item(Item::new("Basil").with_sub_item("Herb")).unwrap();
        grid
    }

    #[test]
    fn test_structural_changes_are_reported() {
        let mut grid = GridListView::new();
        let changes = recorder(&grid.signals().changed);

        grid.add_default_column().unwrap();
        grid.add_default_item().unwrap();
        grid.set_column_width(0, 40).unwrap();
        grid.set_column_width(0, 40).unwrap();
        grid.rename_column(0, "Name").unwrap();
        grid.remove_item(0).unwrap();

        assert_eq!(
            *changes.lock(),
            vec![
                GridChange::ColumnInserted { index: 0 },
                GridChange::ItemInserted { index: 0 },
                GridChange::ColumnResized {
                    index: 0,
                    old_width: 100,
                    new_width: 40
                },
                GridChange::ColumnRenamed {
                    index: 0,
                    old_name: "Column1".into(),
                    new_name: "Name".into()
                },
                GridChange::ItemRemoved {
                    index: 0,
                    name: "Item1".into()
                },
            ]
        );
    }

    #[test]
    fn test_write_back_is_reported_before_column_changes() {
        let mut grid = GridListView::new();
        grid.add_column(Column::new("A").with_editor(EditorKind::Text))
            .unwrap();
        grid.add_item(Item::new("x")).unwrap();
        let changes = recorder(&grid.signals().changed);

        assert!(grid.begin_edit(0, 0));
        grid.active_editor_mut().unwrap().set_text("y");
        grid.insert_column(0, Column::new("B")).unwrap();

        assert!(grid.begin_edit(0, 1));
        grid.active_editor_mut().unwrap().set_text("z");
        grid.remove_column(0).unwrap();

        assert!(grid.begin_edit(0, 0));
        grid.active_editor_mut().unwrap().set_text("w");
        grid.set_column_width(0, 60).unwrap();

        assert_eq!(
            *changes.lock(),
            vec![
                GridChange::SubItemTextChanged { item: 0, column: 0 },
                GridChange::ColumnInserted { index: 0 },
                GridChange::SubItemTextChanged { item: 0, column: 1 },
                GridChange::ColumnRemoved {
                    index: 0,
                    name: "B".into()
                },
                GridChange::SubItemTextChanged { item: 0, column: 0 },
                GridChange::ColumnResized {
                    index: 0,
                    old_width: 100,
                    new_width: 60
                },
            ]
        );
        assert_eq!(grid.model().sub_item(0, 0).unwrap().text(), "w");
    }

    #[test]
    fn test_failed_column_insert_keeps_the_edit() {
        let mut grid = produce_grid();
        assert!(grid.begin_edit(0, 0));
        assert!(grid.insert_column(0, Column::new("Name")).is_err());
        assert!(grid.insert_column(9, Column::new("Extra")).is_err());
        assert_eq!(grid.editing_cell(), Some((0, 0)));
    }

    #[test]
    fn test_rename_column_requests_redraw() {
        let mut grid = produce_grid();
        let redraws = Arc::new(Mutex::new(0));
        let sink = redraws.clone();
        grid.signals()
            .redraw_requested
            .connect(move |_| *sink.lock() += 1);

        grid.rename_column(0, "Title").unwrap();
        assert_eq!(*redraws.lock(), 1);
        grid.rename_column(0, "Title").unwrap();
        assert_eq!(*redraws.lock(), 1);
    }

    #[test]
    fn test_edit_target_removed_by_handler() {
        let mut grid = produce_grid().with_viewport(Size::new(300.0, 60.0));
        let queue = grid.deferred();
        grid.signals().edit_finished.connect(move |finished| {
            if finished.reason == UnloadReason::Replaced {
                queue.post(GridCommand::RemoveItem(2));
            }
        });

        assert!(grid.begin_edit(0, 0));
        assert!(!grid.begin_edit(2, 1));
        assert_eq!(grid.item_count(), 2);
        assert_eq!(grid.editor_state(), HostState::Idle);
        assert!(grid.deferred().is_empty());
    }

    #[test]
    fn test_locked_sub_item_rejects_writes() {
        let mut grid = produce_grid();
        assert!(grid.begin_edit(0, 1));
        assert_eq!(
            grid.set_sub_item_text(0, 1, "x"),
            Err(GridError::SubItemLocked { item: 0, column: 1 })
        );
        grid.set_sub_item_text(0, 0, "Pear").unwrap();
        grid.commit_edit();
        grid.set_sub_item_text(0, 1, "x").unwrap();
        assert_eq!(grid.model().sub_item(0, 1).unwrap().text(), "x");
    }

    #[test]
    fn test_live_text_shows_in_flight_value() {
        let mut grid = produce_grid();
        grid.begin_edit(1, 0);
        grid.send_editor_input(EditorInput::Text("s".into()));
        assert_eq!(grid.live_text(1, 0), Some("Carrots"));
        assert_eq!(grid.model().sub_item(1, 0).unwrap().text(), "Carrot");
        assert_eq!(grid.live_text(0, 0), Some("Apple"));
    }

    #[test]
    fn test_keyboard_commit_and_cancel() {
        let mut grid = produce_grid();
        let finished = recorder(&grid.signals().edit_finished);

        grid.begin_edit(0, 0);
        grid.send_editor_input(EditorInput::Char('!'));
        assert_eq!(grid.send_editor_input(EditorInput::Escape), EditorResponse::Cancel);
        assert_eq!(grid.model().sub_item(0, 0).unwrap().text(), "Apple");

        grid.begin_edit(0, 0);
        grid.send_editor_input(EditorInput::Char('!'));
        assert_eq!(grid.send_editor_input(EditorInput::Enter), EditorResponse::Commit);
        assert_eq!(grid.model().sub_item(0, 0).unwrap().text(), "Apple!");
        assert_eq!(grid.editor_state(), HostState::Idle);

        let outcomes: Vec<_> = finished.lock().iter().map(|f| f.outcome).collect();
        assert_eq!(
            outcomes,
            [EditOutcome::Discarded, EditOutcome::Committed { changed: true }]
        );
        assert_eq!(grid.send_editor_input(EditorInput::Enter), EditorResponse::Ignored);
    }

    #[test]
    fn test_editor_kind_resolution() {
        let mut grid = GridListView::new();
        grid.add_column(Column::new("Plain")).unwrap();
        grid.add_column(Column::new("Size").with_editor(EditorKind::choice(["S", "M", "L"])))
            .unwrap();
        grid.add_item(Item::with_texts(["a", "M"])).unwrap();

        assert!(!grid.begin_edit(0, 0));
        grid.set_sub_item_editor(0, 0, Some(EditorKind::Text)).unwrap();
        assert!(grid.begin_edit(0, 0));
        assert!(grid.begin_edit(0, 1));
        assert_eq!(grid.editing_cell(), Some((0, 1)));
        grid.send_editor_input(EditorInput::Down);
        grid.commit_edit();
        assert_eq!(grid.model().sub_item(0, 1).unwrap().text(), "L");

        grid.set_column_editor(1, Some(EditorKind::Custom("missing".into())))
            .unwrap();
        assert!(!grid.begin_edit(0, 1));
    }

    #[test]
    fn test_replacing_an_edit_commits_the_previous_one() {
        let mut grid = produce_grid();
        grid.begin_edit(0, 0);
        grid.active_editor_mut().unwrap().set_text("Pear");
        grid.begin_edit(1, 0);
        assert_eq!(grid.model().sub_item(0, 0).unwrap().text(), "Pear");
        assert_eq!(grid.editing_cell(), Some((1, 0)));
    }

    #[test]
    fn test_begin_edit_with_custom_editor() {
        let mut grid = produce_grid();
        let editor = Box::new(TextEditor::new().with_max_length(3));
        assert!(grid.begin_edit_with(2, 0, editor));
        assert_eq!(grid.active_editor().unwrap().text(), "Bas");
        grid.cancel_edit();
        assert_eq!(grid.model().sub_item(2, 0).unwrap().text(), "Basil");
    }

    #[test]
    fn test_scroll_commits_editor() {
        let mut grid = produce_grid().with_viewport(Size::new(300.0, 60.0));
        grid.begin_edit(0, 0);
        grid.active_editor_mut().unwrap().set_text("Pear");
        assert!(grid.scroll(ScrollDirection::Down));
        assert_eq!(grid.editor_state(), HostState::Idle);
        assert_eq!(grid.model().sub_item(0, 0).unwrap().text(), "Pear");
        assert_eq!(grid.scroll_offset(), (0.0, 24.0));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut grid = produce_grid().with_viewport(Size::new(300.0, 60.0));
        // 3 rows * 24 = 72 px of content in 36 px of body.
        grid.set_scroll_offset(0.0, 1000.0);
        assert_eq!(grid.scroll_offset(), (0.0, 36.0));
        assert!(!grid.scroll_by(0.0, 10.0));
        grid.set_scroll_offset(-5.0, -5.0);
        assert_eq!(grid.scroll_offset(), (0.0, 0.0));
    }

    #[test]
    fn test_ensure_visible() {
        let mut grid = produce_grid().with_viewport(Size::new(300.0, 60.0));
        grid.ensure_visible(2).unwrap();
        assert_eq!(grid.scroll_offset(), (0.0, 36.0));
        grid.ensure_visible(0).unwrap();
        assert_eq!(grid.scroll_offset(), (0.0, 0.0));
        assert!(grid.ensure_visible(3).is_err());
    }

    #[test]
    fn test_focus_loss_and_resize_commit() {
        let mut grid = produce_grid();
        grid.set_focused(true);
        grid.begin_edit(0, 0);
        grid.active_editor_mut().unwrap().set_text("A");
        grid.set_focused(false);
        assert_eq!(grid.model().sub_item(0, 0).unwrap().text(), "A");

        let finished = recorder(&grid.signals().edit_finished);
        grid.begin_edit(0, 0);
        grid.set_viewport(Some(Size::new(200.0, 200.0)));
        assert_eq!(finished.lock()[0].reason, UnloadReason::Resized);
    }

    #[test]
    fn test_removing_bound_item_discards_edit() {
        let mut grid = produce_grid();
        let finished = recorder(&grid.signals().edit_finished);
        grid.begin_edit(1, 1);
        grid.active_editor_mut().unwrap().set_text("changed");
        grid.remove_item(1).unwrap();

        assert_eq!(grid.editor_state(), HostState::Idle);
        let event = finished.lock()[0];
        assert_eq!(event.reason, UnloadReason::ItemRemoved);
        assert_eq!(event.outcome, EditOutcome::Discarded);
        assert_eq!(event.item, Some(1));
        assert!(grid.model().items().all(|i| i.sub_item(1).unwrap().text() != "changed"));
    }

    #[test]
    fn test_editor_follows_rows() {
        let mut grid = produce_grid();
        grid.begin_edit(1, 0);
        grid.insert_item(0, Item::new("Date")).unwrap();
        assert_eq!(grid.editing_cell(), Some((2, 0)));
        assert_eq!(
            grid.active_editor().unwrap().geometry(),
            grid.cell_rect(2, 0).unwrap()
        );
    }

    #[test]
    fn test_click_selection_modes() {
        let mut grid = produce_grid();
        let row = |grid: &GridListView, item| grid.cell_rect(item, 0).unwrap().center();

        let p0 = row(&grid, 0);
        let p2 = row(&grid, 2);
        grid.click(p0);
        grid.click(p2);
        assert_eq!(grid.selected_items(), vec![2]);

        grid.set_selection_mode(SelectionMode::Multi);
        grid.click(p0);
        assert_eq!(grid.selected_items(), vec![0, 2]);
        grid.click(p2);
        assert_eq!(grid.selected_items(), vec![0]);

        grid.select_item(1, true).unwrap();
        grid.set_selection_mode(SelectionMode::Single);
        assert_eq!(grid.selected_items(), vec![0]);

        grid.set_selection_mode(SelectionMode::None);
        assert!(grid.selected_items().is_empty());
        grid.click(p0);
        assert!(grid.selected_items().is_empty());
    }

    #[test]
    fn test_header_click_sorts_when_enabled() {
        let mut grid = produce_grid();
        let header = grid.header_rect(0).unwrap().center();
        grid.click(header);
        assert_eq!(grid.model().item(0).unwrap().text(), "Apple");
        assert_eq!(grid.model().column(0).unwrap().sort_order(), SortOrder::None);

        grid.set_sorting_enabled(true);
        grid.select_item(0, true).unwrap();
        grid.click(header);
        let names: Vec<_> = grid.model().items().map(|i| i.text().to_string()).collect();
        assert_eq!(names, ["Apple", "Basil", "Carrot"]);
        grid.click(header);
        let names: Vec<_> = grid.model().items().map(|i| i.text().to_string()).collect();
        assert_eq!(names, ["Carrot", "Basil", "Apple"]);
        assert_eq!(grid.model().column(0).unwrap().sort_order(), SortOrder::Descending);
        assert_eq!(grid.selected_items(), vec![2]);
    }

    #[test]
    fn test_click_on_scroll_affordance() {
        let mut grid = produce_grid().with_viewport(Size::new(300.0, 60.0));
        let layout = grid.layout();
        let down = layout
            .scroll_areas
            .iter()
            .find(|a| a.direction == ScrollDirection::Down)
            .unwrap()
            .rect
            .center();
        assert_eq!(grid.click(down), Region::Scroll(ScrollDirection::Down));
        assert_eq!(grid.scroll_offset(), (0.0, 24.0));
    }

    #[test]
    fn test_click_outside_editor_commits() {
        let mut grid = produce_grid();
        let clicks = recorder(&grid.signals().clicked);
        grid.begin_edit(0, 0);
        grid.active_editor_mut().unwrap().set_text("Pear");

        let inside = grid.cell_rect(0, 0).unwrap().center();
        grid.click(inside);
        assert_eq!(grid.editor_state(), HostState::Active);
        assert!(clicks.lock().is_empty());

        grid.click(grid.cell_rect(2, 1).unwrap().center());
        assert_eq!(grid.editor_state(), HostState::Idle);
        assert_eq!(grid.model().sub_item(0, 0).unwrap().text(), "Pear");
        assert_eq!(clicks.lock()[0].item, Some(2));
        assert_eq!(clicks.lock()[0].column, Some(1));
    }

    #[test]
    fn test_hover_transitions() {
        let mut grid = produce_grid();
        let hover = recorder(&grid.signals().hover);
        let a = grid.cell_rect(0, 0).unwrap().center();
        let b = grid.cell_rect(0, 1).unwrap().center();

        grid.pointer_moved(a);
        grid.pointer_moved(Point::new(a.x + 1.0, a.y));
        grid.pointer_moved(b);
        grid.pointer_left();

        let kinds: Vec<_> = hover.lock().iter().map(|e| (e.kind, e.current)).collect();
        let cell_a = Region::Item { item: 0, column: 0 };
        let cell_b = Region::Item { item: 0, column: 1 };
        assert_eq!(
            kinds,
            [
                (HoverKind::Enter, cell_a),
                (HoverKind::Move, cell_a),
                (HoverKind::Leave, cell_b),
                (HoverKind::Enter, cell_b),
                (HoverKind::Leave, Region::Nowhere),
            ]
        );
        assert_eq!(grid.hovered(), Region::Nowhere);
    }

    #[test]
    fn test_hover_tracks_structural_changes() {
        let mut grid = produce_grid();
        let p = grid.cell_rect(2, 0).unwrap().center();
        grid.pointer_moved(p);
        assert_eq!(grid.hovered(), Region::Item { item: 2, column: 0 });
        grid.remove_item(2).unwrap();
        assert_eq!(grid.hovered(), Region::Nowhere);
    }

    #[test]
    fn test_cell_colors_follow_hover_and_selection() {
        let mut grid = produce_grid();
        let appearance = grid.appearance().clone();
        grid.pointer_moved(grid.cell_rect(1, 0).unwrap().center());
        assert_eq!(grid.cell_colors(1, 1), Some(appearance.cell_colors(false, true)));
        grid.select_item(0, true).unwrap();
        assert_eq!(grid.cell_colors(0, 0), Some(appearance.cell_colors(true, false)));
        assert_eq!(grid.cell_colors(5, 0), None);
    }

    #[test]
    fn test_theme_reaches_active_editor() {
        let mut grid = produce_grid();
        grid.begin_edit(0, 0);
        let palette = ColorPalette::light().with(
            PaletteRole::EditorBackground,
            gridkit_style::Color::from_rgb8(1, 2, 3),
        );
        let report = grid.apply_theme(Arc::new(Theme::custom("t", ThemeMode::Light, palette)));
        assert_eq!(report.changed, vec![PaletteRole::EditorBackground]);
        assert_eq!(
            grid.appearance().editor_colors().background,
            gridkit_style::Color::from_rgb8(1, 2, 3)
        );
        assert_eq!(grid.theme().name(), "t");
    }

    #[test]
    fn test_deferred_commands_run_after_dispatch() {
        let mut grid = produce_grid();
        let queue = grid.deferred();
        grid.signals().changed.connect(move |change| {
            if let GridChange::ColumnInserted { index } = change {
                queue.post(GridCommand::SetColumnWidth(*index, 10));
            }
        });
        let changes = recorder(&grid.signals().changed);

        grid.add_column(Column::new("Notes")).unwrap();
        assert_eq!(grid.model().column(2).unwrap().width(), 10);
        assert_eq!(
            changes.lock().last(),
            Some(&GridChange::ColumnResized {
                index: 2,
                old_width: 100,
                new_width: 10
            })
        );
    }

    #[test]
    fn test_self_feeding_commands_are_bounded() {
        let mut grid = produce_grid();
        let queue = grid.deferred();
        grid.signals().changed.connect(move |_| {
            queue.post(GridCommand::AddItem(Item::unnamed()));
        });
        grid.add_default_item().unwrap();
        assert!(grid.item_count() > 4);
        assert!(grid.deferred().is_empty());
    }

    #[test]
    fn test_clear_discards_edit() {
        let mut grid = produce_grid();
        let changes = recorder(&grid.signals().changed);
        grid.begin_edit(0, 0);
        grid.clear();
        assert_eq!(grid.editor_state(), HostState::Idle);
        assert_eq!(grid.column_count(), 0);
        assert_eq!(grid.item_count(), 0);
        assert_eq!(changes.lock().last(), Some(&GridChange::Cleared));
        assert_eq!(grid.region_at(Point::new(5.0, 5.0)), Region::Nowhere);
    }

    #[test]
    fn test_move_column_reports_and_reclassifies() {
        let mut grid = produce_grid();
        let changes = recorder(&grid.signals().changed);
        grid.move_column(0, 1).unwrap();
        assert_eq!(
            changes.lock()[0],
            GridChange::ColumnMoved {
                column: 0,
                from: 0,
                to: 1
            }
        );
        assert_eq!(
            grid.region_at(Point::new(10.0, 30.0)),
            Region::Item { item: 0, column: 1 }
        );
    }
}
