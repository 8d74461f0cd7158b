//! Editor capability traits and the values they exchange with the host.

use gridkit_style::Color;

use crate::geometry::Rect;
use crate::model::{Column, GridModel, Item, SubItem};

/// Keyboard input routed to the active editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorInput {
    /// A typed character.
    Char(char),
    /// Pasted or composed text.
    Text(String),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Up,
    Down,
    Enter,
    Escape,
    Tab,
}

/// What an editor asks the host to do after handling input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorResponse {
    /// The editor did not use the input.
    Ignored,
    /// The editor consumed the input; the session continues.
    Handled,
    /// End the session and write the value back.
    Commit,
    /// End the session and discard the value.
    Cancel,
}

/// Colors the theme layer pushes onto the active editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorColors {
    pub background: Color,
    pub text: Color,
    pub border: Color,
}

impl Default for EditorColors {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            text: Color::BLACK,
            border: Color::GRAY,
        }
    }
}

/// Everything an editor may look at while loading.
#[derive(Debug, Clone, Copy)]
pub struct EditContext<'a> {
    pub grid: &'a GridModel,
    pub item: &'a Item,
    pub sub_item: &'a SubItem,
    pub column: &'a Column,
    pub item_index: usize,
    pub column_index: usize,
}

/// Error returned when an editor cannot produce a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    /// `return_text` was called outside a load/unload pair.
    #[error("editor is not loaded")]
    NotLoaded,

    /// The edit buffer does not hold a value the editor accepts.
    #[error("'{value}' is not a valid value: {reason}")]
    InvalidValue { value: String, reason: String },
}

/// Minimal widget capability shared by every editor.
pub trait EditorWidget {
    /// The value currently shown by the editor.
    fn text(&self) -> &str;

    /// Replace the shown value.
    fn set_text(&mut self, text: &str);

    fn geometry(&self) -> Rect;

    fn set_geometry(&mut self, rect: Rect);

    fn is_focused(&self) -> bool;

    fn set_focused(&mut self, focused: bool);

    /// React to keyboard input.
    fn handle_input(&mut self, input: EditorInput) -> EditorResponse;

    /// Restyle with theme colors.
    fn apply_colors(&mut self, colors: &EditorColors);
}

/// An editor the grid can embed over a cell.
///
/// The host calls the methods of one session in a fixed order:
/// `load`, any number of widget interactions, `return_text`, `unload`.
/// `return_text` is called even when the edit is being discarded.
pub trait EmbeddedEditor: EditorWidget {
    /// Prepare to edit the given cell. Returning `false` aborts the session
    /// without side effects.
    fn load(&mut self, ctx: &EditContext<'_>) -> bool;

    /// The value to write back into the sub-item.
    fn return_text(&self) -> Result<String, EditorError>;

    /// Release per-session state.
    fn unload(&mut self);
}
