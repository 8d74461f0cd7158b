//! Change, hover and click notifications.
//!
//! All signals are dispatched synchronously on the thread driving the grid,
//! after the change they describe has been fully applied. Handlers must not
//! block. A handler that wants to mutate the grid posts a [`GridCommand`] to
//! the queue returned by
//! [`GridListView::deferred`](crate::GridListView::deferred); queued commands
//! run once the operation that emitted the signal has finished.

use gridkit_core::Signal;

use crate::editor::{EditOutcome, UnloadReason};
use crate::geometry::Point;
use crate::model::{Column, Item, SortOrder};
use crate::region::Region;
use crate::theme::ThemeReport;

/// A structural or data change of the grid.
///
/// Indices are logical and refer to the state after the change.
#[derive(Debug, Clone, PartialEq)]
pub enum GridChange {
    ColumnInserted { index: usize },
    ColumnRemoved { index: usize, name: String },
    ColumnResized {
        index: usize,
        old_width: u32,
        new_width: u32,
    },
    ColumnRenamed {
        index: usize,
        old_name: String,
        new_name: String,
    },
    ColumnTextChanged { index: usize },
    /// A column moved between display positions.
    ColumnMoved {
        column: usize,
        from: usize,
        to: usize,
    },
    /// The sort indicator changed; `column` is the column now showing it.
    SortChanged { column: usize, order: SortOrder },
    ItemInserted { index: usize },
    ItemRemoved { index: usize, name: String },
    /// Items were reordered by a column's text.
    ItemsSorted { column: usize, order: SortOrder },
    SubItemTextChanged { item: usize, column: usize },
    SelectionChanged { item: usize, selected: bool },
    /// Every column and item was removed.
    Cleared,
}

/// How the hovered region changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverKind {
    /// The pointer entered `current`.
    Enter,
    /// The pointer left `previous`.
    Leave,
    /// The pointer moved within `current`.
    Move,
}

/// A hover transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverEvent {
    pub kind: HoverKind,
    pub previous: Region,
    pub current: Region,
    /// Pointer position, `None` when the pointer left the grid.
    pub position: Option<Point>,
}

/// A click on the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub region: Region,
    pub item: Option<usize>,
    pub column: Option<usize>,
    pub position: Point,
}

impl ClickEvent {
    pub(crate) fn new(region: Region, position: Point) -> Self {
        Self {
            region,
            item: region.item(),
            column: region.column(),
            position,
        }
    }
}

/// An edit session started on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditStarted {
    pub item: usize,
    pub column: usize,
}

/// An edit session ended.
///
/// Indices are those of the bound cell when the session ended, taken before
/// any removal that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditFinished {
    pub item: Option<usize>,
    pub column: Option<usize>,
    pub reason: UnloadReason,
    pub outcome: EditOutcome,
}

/// A grid mutation requested from inside a signal handler.
///
/// Indices are resolved when the command runs, after earlier commands have
/// been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum GridCommand {
    AddColumn(Column),
    InsertColumn(usize, Column),
    RemoveColumn(usize),
    SetColumnWidth(usize, u32),
    AddItem(Item),
    InsertItem(usize, Item),
    RemoveItem(usize),
    SetText {
        item: usize,
        column: usize,
        text: String,
    },
    Select { item: usize, selected: bool },
    BeginEdit { item: usize, column: usize },
    CommitEdit,
    CancelEdit,
    Clear,
}

/// Signals emitted by a grid.
pub struct GridSignals {
    /// Structural and data changes.
    pub changed: Signal<GridChange>,
    /// Hover transitions between regions.
    pub hover: Signal<HoverEvent>,
    /// Clicks, including clicks on [`Region::Nowhere`].
    pub clicked: Signal<ClickEvent>,
    pub edit_started: Signal<EditStarted>,
    pub edit_finished: Signal<EditFinished>,
    /// The grid needs repainting.
    pub redraw_requested: Signal<()>,
    /// At least one themed color changed.
    pub theme_changed: Signal<ThemeReport>,
}

impl GridSignals {
    pub fn new() -> Self {
        Self {
            changed: Signal::new(),
            hover: Signal::new(),
            clicked: Signal::new(),
            edit_started: Signal::new(),
            edit_finished: Signal::new(),
            redraw_requested: Signal::new(),
            theme_changed: Signal::new(),
        }
    }

    /// Block or unblock every signal at once.
    pub fn set_blocked(&self, blocked: bool) {
        self.changed.set_blocked(blocked);
        self.hover.set_blocked(blocked);
        self.clicked.set_blocked(blocked);
        self.edit_started.set_blocked(blocked);
        self.edit_finished.set_blocked(blocked);
        self.redraw_requested.set_blocked(blocked);
        self.theme_changed.set_blocked(blocked);
    }
}

impl Default for GridSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GridSignals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridSignals").finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(GridSignals: Send, Sync);
static_assertions::assert_impl_all!(GridCommand: Send, Sync);
