//! Lifecycle of the single editor embedded in a grid.

use gridkit_core::logging::targets;

use crate::geometry::Rect;
use crate::model::{ColumnId, GridModel, ItemId};

use super::widget::{EditContext, EditorColors, EmbeddedEditor};

/// Where the host is in an edit session.
///
/// `Loading` and `Unloading` are only observable from inside editor
/// callbacks; between public operations the host is `Idle` or `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostState {
    #[default]
    Idle,
    Loading,
    Active,
    Unloading,
}

/// Why an edit session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnloadReason {
    /// The editor or caller committed.
    Commit,
    /// The editor or caller cancelled.
    Cancel,
    /// The grid lost keyboard focus, or the pointer clicked elsewhere.
    FocusLost,
    /// The grid scrolled.
    Scrolled,
    /// The grid's viewport or row metrics changed.
    Resized,
    /// Another cell started editing.
    Replaced,
    /// The bound item was removed.
    ItemRemoved,
    /// The bound column was removed.
    ColumnRemoved,
    /// Columns were inserted, moved or resized.
    Structural,
}

impl UnloadReason {
    /// Whether the editor's value is written into the sub-item.
    pub fn writes_back(self) -> bool {
        !matches!(self, Self::Cancel | Self::ItemRemoved | Self::ColumnRemoved)
    }
}

/// What happened to the edited value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The value was written back; `changed` is false when it equalled the
    /// stored text.
    Committed { changed: bool },
    /// The value was thrown away.
    Discarded,
    /// The editor could not produce a value; the stored text is unchanged.
    ReadFailed,
}

/// Result of ending a session, reported by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Finished {
    pub item: ItemId,
    pub column: ColumnId,
    pub reason: UnloadReason,
    pub outcome: EditOutcome,
}

struct Session {
    item: ItemId,
    column: ColumnId,
    editor: Box<dyn EmbeddedEditor>,
}

/// Owns at most one active editor and the sub-item it is bound to.
///
/// While a session is active the bound sub-item is written only by
/// [`unload`](Self::unload).
#[derive(Default)]
pub struct EditorHost {
    state: HostState,
    session: Option<Session>,
}

impl EditorHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == HostState::Active
    }

    /// The bound cell, if a session is active.
    pub fn binding(&self) -> Option<(ItemId, ColumnId)> {
        self.session.as_ref().map(|s| (s.item, s.column))
    }

    pub fn is_bound_to(&self, item: ItemId, column: ColumnId) -> bool {
        self.binding() == Some((item, column))
    }

    pub fn editor(&self) -> Option<&dyn EmbeddedEditor> {
        self.session.as_ref().map(|s| s.editor.as_ref())
    }

    pub fn editor_mut(&mut self) -> Option<&mut dyn EmbeddedEditor> {
        match &mut self.session {
            Some(session) => Some(session.editor.as_mut()),
            None => None,
        }
    }

    /// Load `editor` on a cell. Returns `false`, leaving the host idle, when
    /// a session is already active, the cell no longer exists, or the editor
    /// declines.
    pub(crate) fn load(
        &mut self,
        mut editor: Box<dyn EmbeddedEditor>,
        model: &GridModel,
        item: ItemId,
        column: ColumnId,
        rect: Rect,
        colors: &EditorColors,
    ) -> bool {
        if self.session.is_some() {
            tracing::debug!(target: targets::EDITOR, "load refused, a session is active");
            return false;
        }

        self.state = HostState::Loading;
        let loaded = match edit_context(model, item, column) {
            Some(ctx) => editor.load(&ctx),
            None => {
                tracing::debug!(target: targets::EDITOR, "load target no longer exists");
                false
            }
        };
        if !loaded {
            self.state = HostState::Idle;
            tracing::debug!(target: targets::EDITOR, "editor declined to load");
            return false;
        }

        editor.set_geometry(rect);
        editor.apply_colors(colors);
        editor.set_focused(true);
        self.session = Some(Session {
            item,
            column,
            editor,
        });
        self.state = HostState::Active;
        tracing::debug!(target: targets::EDITOR, ?item, ?column, "editor active");
        true
    }

    /// End the active session. The editor is always asked for its text and
    /// then unloaded; the text is written back only when `reason` allows it.
    pub(crate) fn unload(
        &mut self,
        reason: UnloadReason,
        model: &mut GridModel,
    ) -> Option<Finished> {
        let mut session = self.session.take()?;
        self.state = HostState::Unloading;

        let read = session.editor.return_text();
        session.editor.set_focused(false);
        session.editor.unload();

        let outcome = match (reason.writes_back(), read) {
            (false, _) => EditOutcome::Discarded,
            (true, Ok(text)) => {
                match model.set_sub_item_text(session.item, session.column, text) {
                    Some(changed) => EditOutcome::Committed { changed },
                    None => EditOutcome::Discarded,
                }
            }
            (true, Err(err)) => {
                tracing::warn!(
                    target: targets::EDITOR,
                    error = %err,
                    "editor value not written back"
                );
                EditOutcome::ReadFailed
            }
        };

        self.state = HostState::Idle;
        tracing::debug!(target: targets::EDITOR, ?reason, ?outcome, "editor unloaded");
        Some(Finished {
            item: session.item,
            column: session.column,
            reason,
            outcome,
        })
    }

    pub(crate) fn set_geometry(&mut self, rect: Rect) {
        if let Some(session) = &mut self.session {
            session.editor.set_geometry(rect);
        }
    }

    pub(crate) fn apply_colors(&mut self, colors: &EditorColors) {
        if let Some(session) = &mut self.session {
            session.editor.apply_colors(colors);
        }
    }
}

impl std::fmt::Debug for EditorHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorHost")
            .field("state", &self.state)
            .field("binding", &self.binding())
            .finish()
    }
}

fn edit_context(model: &GridModel, item: ItemId, column: ColumnId) -> Option<EditContext<'_>> {
    let column_index = model.column_index(column)?;
    let item_index = model.item_index(item)?;
    let item_ref = model.item_by_id(item)?;
    Some(EditContext {
        grid: model,
        item: item_ref,
        sub_item: item_ref.sub_item(column_index)?,
        column: model.column_by_id(column)?,
        item_index,
        column_index,
    })
}
