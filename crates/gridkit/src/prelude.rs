//! Prelude module for gridkit.
//!
//! ```
//! use gridkit::prelude::*;
//! ```

// ============================================================================
// Grid
// ============================================================================

pub use crate::config::{GridConfig, SelectionMode};
pub use crate::error::GridError;
pub use crate::model::{Column, GridModel, Item, SortOrder, SubItem};
pub use crate::view::GridListView;

// ============================================================================
// Geometry and Hit-Testing
// ============================================================================

pub use crate::geometry::{Point, Rect, Size};
pub use crate::region::{Region, ScrollDirection};

// ============================================================================
// Editing
// ============================================================================

pub use crate::editor::{
    EditOutcome, EditorInput, EditorKind, EditorResponse, EditorWidget, EmbeddedEditor,
    HostState, UnloadReason,
};

// ============================================================================
// Notifications
// ============================================================================

pub use crate::notify::{GridChange, GridCommand, HoverKind};
pub use gridkit_core::Signal;

// ============================================================================
// Theming
// ============================================================================

pub use gridkit_style::{Color, ColorPalette, PaletteRole, Theme, ThemeMode};
