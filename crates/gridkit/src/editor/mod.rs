//! Embedded cell editors.
//!
//! An editor is any type implementing [`EmbeddedEditor`], which extends the
//! minimal [`EditorWidget`] capability with the `load`/`return_text`/`unload`
//! session protocol. The grid's [`EditorHost`] drives at most one editor at
//! a time; [`EditorRegistry`] turns a cell's [`EditorKind`] into a fresh
//! editor when editing starts.

mod choice;
mod host;
mod kind;
mod registry;
mod spin;
mod surface;
mod text;
mod widget;

pub use choice::ChoiceEditor;
pub use host::{EditOutcome, EditorHost, HostState, UnloadReason};
pub use kind::{EditorKey, EditorKind};
pub use registry::{EditorFactory, EditorRegistry};
pub use spin::SpinEditor;
pub use surface::EditorSurface;
pub use text::TextEditor;
pub use widget::{
    EditContext, EditorColors, EditorError, EditorInput, EditorResponse, EditorWidget,
    EmbeddedEditor,
};
