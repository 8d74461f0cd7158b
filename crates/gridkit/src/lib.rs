//! gridkit - a multi-column list grid with embedded cell editors.
//!
//! The grid shows items in rows and columns. Each item carries one
//! sub-item per column, and any cell can be edited in place by an editor
//! chosen from the cell's or column's [`EditorKind`].
//!
//! - [`GridModel`] holds columns, items and sub-items and keeps them in
//!   step: every item always has exactly one sub-item per column.
//! - [`GridListView`] wraps the model with layout, hit-testing
//!   ([`Region`]), hover and selection, the single active editor and the
//!   themed [`GridAppearance`].
//! - Changes are reported through [`GridSignals`]; handlers that need to
//!   mutate the grid post a [`GridCommand`] instead of re-entering it.
//!
//! # Example
//!
//! ```
//! use gridkit::prelude::*;
//!
//! let mut grid = GridListView::new().with_viewport(Size::new(400.0, 300.0));
//! grid.add_default_column().unwrap();
//! grid.add_default_item().unwrap();
//! grid.add_default_item().unwrap();
//!
//! assert_eq!(grid.model().column(0).unwrap().name(), "Column1");
//! let names: Vec<_> = grid.model().items().map(|i| i.name()).collect();
//! assert_eq!(names, ["Item1", "Item2"]);
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod model;
pub mod notify;
pub mod prelude;
pub mod region;
pub mod theme;
pub mod view;

pub use config::{GridConfig, SelectionMode};
pub use editor::{
    ChoiceEditor, EditContext, EditOutcome, EditorColors, EditorError, EditorHost, EditorInput,
    EditorKind, EditorRegistry, EditorResponse, EditorWidget, EmbeddedEditor, HostState,
    SpinEditor, TextEditor, UnloadReason,
};
pub use error::{EntityKind, GridError, Result};
pub use geometry::{Point, Rect, Size};
pub use model::{Column, ColumnId, GridId, GridModel, Item, ItemId, SortOrder, SubItem};
pub use notify::{
    ClickEvent, EditFinished, EditStarted, GridChange, GridCommand, GridSignals, HoverEvent,
    HoverKind,
};
pub use region::{GridLayout, Region, ScrollDirection, classify};
pub use theme::{CellColors, GridAppearance, ThemeReport};
pub use view::GridListView;

pub use gridkit_core::{ConnectionId, DeferredQueue, Property, Signal};
pub use gridkit_style::{Color, ColorPalette, PaletteRole, Theme, ThemeMode};
